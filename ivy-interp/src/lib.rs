//! Tree-walking interpreter for Ivy programs.

pub mod error;
pub mod interpreter;
pub mod value;

pub use error::{ExecError, RuntimeError};
pub use interpreter::{Interpreter, Status};
pub use value::Value;
