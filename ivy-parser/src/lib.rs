//! Lexer, AST and parser for the Ivy language.

pub mod ast;
pub mod display;
pub mod lexer;
pub mod parser;
