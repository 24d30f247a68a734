use super::*;
use crate::ast::{Assignment, Block, Stmt, TypeName};

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.current.token {
            Token::Int | Token::Float => self.parse_declaration(),
            Token::Identifier(_) => Ok(Stmt::Assignment(self.parse_assignment()?)),
            Token::If => self.parse_if_stmt(),
            Token::While => self.parse_while_stmt(),
            Token::For => self.parse_for_stmt(),
            Token::Print => self.parse_print_stmt(),
            _ => Err(self.unexpected()),
        }
    }

    /// Parses one or more statements, stopping in front of `terminator` (which is not eaten).
    pub(super) fn parse_stmt_list(&mut self, terminator: &Token) -> ParseResult<Vec<Stmt>> {
        let mut body = Vec::new();
        loop {
            body.push(self.parse_stmt()?);

            if self.check(terminator) {
                break;
            }
        }
        Ok(body)
    }

    /// Parses `{ statement+ }`.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        self.expect(Token::OpenBrace)?;
        let body = self.parse_stmt_list(&Token::CloseBrace)?;
        self.expect(Token::CloseBrace)?;
        Ok(body)
    }

    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        let ty = match self.current.token {
            Token::Int => TypeName::Int,
            Token::Float => TypeName::Float,
            _ => return Err(self.unexpected()),
        };
        self.next();

        let mut idents = vec![self.expect_ident()?];
        while self.eat(Token::Comma) {
            idents.push(self.expect_ident()?);
        }
        self.expect(Token::Semi)?;

        Ok(Stmt::Declaration { ty, idents })
    }

    /// Parses `ident = expression` without the trailing semicolon.
    fn parse_binding(&mut self) -> ParseResult<Assignment> {
        let ident = self.expect_ident()?;
        self.expect(Token::Equals)?;
        let value = self.parse_expr()?;
        Ok(Assignment { ident, value })
    }

    fn parse_assignment(&mut self) -> ParseResult<Assignment> {
        let assignment = self.parse_binding()?;
        self.expect(Token::Semi)?;
        Ok(assignment)
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::If)?;
        self.expect(Token::OpenParen)?;
        let condition = self.parse_condition()?;
        self.expect(Token::CloseParen)?;
        let then_block = self.parse_block()?;

        let else_block = if self.eat(Token::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::While)?;
        self.expect(Token::OpenParen)?;
        let condition = self.parse_condition()?;
        self.expect(Token::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    /// Parses `for (init; condition; step) { ... }`.
    /// The init clause is a full assignment (it owns the first `;`), the step clause has no `;`.
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::For)?;
        self.expect(Token::OpenParen)?;
        let init = self.parse_assignment()?;
        let condition = self.parse_condition()?;
        self.expect(Token::Semi)?;
        let step = self.parse_binding()?;
        self.expect(Token::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::For {
            init,
            condition,
            step,
            body,
        })
    }

    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Print)?;
        self.expect(Token::OpenParen)?;

        let mut args = vec![self.parse_expr()?];
        while self.eat(Token::Comma) {
            args.push(self.parse_expr()?);
        }

        self.expect(Token::CloseParen)?;
        self.expect(Token::Semi)?;
        Ok(Stmt::Print(args))
    }
}
