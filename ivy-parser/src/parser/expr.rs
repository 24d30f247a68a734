use super::*;
use crate::ast::{Condition, Expr};

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        match self.current.token {
            Token::Number(val) => {
                self.next();
                Ok(Expr::Number(val))
            }
            Token::Identifier(_) => Ok(Expr::Variable(self.expect_ident()?)),
            Token::OpenParen => {
                self.next();
                // no grouping node, the inner expression is returned as is
                let expr = self.parse_expr()?;
                self.expect(Token::CloseParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let op = match self.current.token.binop() {
                Some(op) => op,
                None => break, // not a valid binop, stop parsing
            };
            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            self.next();

            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            }
        }

        Ok(lhs)
    }

    /* Conditions */
    /// Parses a single comparison between two expressions.
    pub fn parse_condition(&mut self) -> ParseResult<Condition> {
        let lhs = self.parse_expr()?;
        let op = match self.current.token.cmp_op() {
            Some(op) => op,
            None => return Err(self.unexpected()),
        };
        self.next();
        let rhs = self.parse_expr()?;
        Ok(Condition { op, lhs, rhs })
    }
}
