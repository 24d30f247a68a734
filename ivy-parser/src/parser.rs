use crate::ast::Program;
use crate::lexer::{Lexeme, Lexer, Token};
use ivy_source::{Source, SyntaxError};
use std::mem;

mod expr;
mod stmt;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Recursive descent parser. Stops at the first syntax error.
pub struct Parser<'a> {
    /// Cached token for peeking.
    current: Lexeme<'a>,
    lexer: Lexer<'a>,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next().unwrap_or_else(|| Lexeme::eof(source));
        Self {
            current,
            lexer,
            source,
        }
    }

    /// Parses a whole program.
    ///
    /// Returns `None` if the input is not a valid program. The reason is added to `source.errors`.
    /// Lexical errors make the parse fail as well, even if the remaining tokens form a valid program.
    pub fn parse_program(&mut self) -> Option<Program> {
        match self.parse_stmt_list(&Token::Eof) {
            Ok(body) if self.source.has_no_errors() => {
                tracing::debug!(statements = body.len(), "parsed program");
                Some(Program { body })
            }
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(%err, "syntax error");
                self.source.errors.add_error(err);
                None
            }
        }
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn next(&mut self) -> Lexeme<'a> {
        let source = self.source;
        let lexeme = self.lexer.next().unwrap_or_else(|| Lexeme::eof(source));
        mem::replace(&mut self.current, lexeme)
    }

    /// Predicate that tests whether the current token has the same discriminant as `tok`.
    fn check(&self, tok: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(tok)
    }

    /// Predicate that tests whether the next token has the same discriminant and eats the next token if yes as a side effect.
    fn eat(&mut self, tok: Token) -> bool {
        if self.check(&tok) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token) -> ParseResult<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.current.token {
            Token::Identifier(ref ident) => {
                let ident = ident.clone();
                self.next();
                Ok(ident)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Creates an unexpected token error for the current token.
    fn unexpected(&self) -> SyntaxError {
        let message = match self.current.token {
            Token::Eof => "Unexpected end of input".to_string(),
            _ => format!("Unexpected token '{}'", self.current.slice),
        };
        SyntaxError::new(message, self.current.span.clone(), self.current.position)
    }
}
