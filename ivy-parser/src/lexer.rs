use crate::ast::{BinOp, CmpOp, Number};
use ivy_source::{Position, Source};
use logos::Logos;
use std::ops::Range;

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum Token {
    // literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok().map(Number::Int))]
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse().ok().map(Number::Float))]
    Number(Number),

    // identifiers
    #[regex("[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // keywords
    #[token("int")]
    Int,
    #[token("float")]
    Float,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("print")]
    Print,

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,

    /// Only generated in parse phase when `lexer.next()` returns `None`.
    Eof,
}

impl Token {
    /// Returns the arithmetic operator for this token or `None` if not an arithmetic operator.
    pub fn binop(&self) -> Option<BinOp> {
        match self {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            Token::Asterisk => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            _ => None,
        }
    }

    /// Returns the comparison operator for this token or `None` if not a comparison operator.
    pub fn cmp_op(&self) -> Option<CmpOp> {
        match self {
            Token::GreaterThan => Some(CmpOp::Gt),
            Token::LessThan => Some(CmpOp::Lt),
            Token::GreaterThanEquals => Some(CmpOp::Ge),
            Token::LessThanEquals => Some(CmpOp::Le),
            Token::EqualsEquals => Some(CmpOp::Eq),
            Token::NotEquals => Some(CmpOp::Ne),
            _ => None,
        }
    }
}

/// A [`Token`] together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'a> {
    pub token: Token,
    /// The matched source text.
    pub slice: &'a str,
    pub span: Range<usize>,
    pub position: Position,
}

impl<'a> Lexeme<'a> {
    /// The end marker, located just after the last character of `source`.
    pub fn eof(source: &Source<'a>) -> Self {
        let end = source.content.len();
        Self {
            token: Token::Eof,
            slice: "",
            span: end..end,
            position: source.end_position(),
        }
    }
}

/// Lazy token stream over a [`Source`].
///
/// Unrecognized input is reported to `source.errors` and skipped, so the stream never yields [`Token::Error`].
/// Creating a new `Lexer` over the same source restarts from the beginning.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    source: &'a Source<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            inner: Token::lexer(source.content),
            source,
        }
    }

    fn report(&self, slice: &str, span: Range<usize>) {
        let message = match slice.chars().next() {
            Some(c) if c.is_ascii_digit() => format!("Invalid number literal '{}'", slice),
            Some(c) => format!("Unexpected character '{}'", c),
            None => "Unexpected character".to_string(),
        };
        tracing::debug!(%message, ?span, "lexical error");
        self.source.errors.add_error(self.source.error_at(message, span));
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Lexeme<'a>> {
        loop {
            let token = self.inner.next()?;
            let span = self.inner.span();
            let slice = self.inner.slice();
            if token == Token::Error {
                self.report(slice, span);
                continue;
            }
            return Some(Lexeme {
                token,
                slice,
                position: self.source.position(span.start),
                span,
            });
        }
    }
}

/// Collects the whole token stream of `source`. The end marker is not included.
pub fn tokenize<'a>(source: &'a Source<'a>) -> Vec<Lexeme<'a>> {
    Lexer::new(source).collect()
}
