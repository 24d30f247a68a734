use std::io;
use thiserror::Error;

/// A recoverable error. Execution continues with a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Variable '{name}' not declared")]
    UndeclaredVariable { name: String },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Uninitialized value used as operand of '{op}'")]
    UninitializedOperand { op: &'static str },
}

/// An error that aborts the current run.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
}
