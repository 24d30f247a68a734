//! Runs Ivy programs from source text.

pub mod input;

use ivy_interp::{ExecError, Interpreter, Status};
use ivy_parser::parser::Parser;
use ivy_source::Source;
use std::fmt;
use std::io::Write;

/// Final state of [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The input was blank. Nothing was parsed or executed.
    Empty,
    Success,
    CompletedWithErrors,
    /// The input is not a valid program. Nothing was executed.
    ParseFailed,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Empty | Outcome::Success => 0,
            Outcome::CompletedWithErrors => 1,
            Outcome::ParseFailed => 2,
        }
    }
}

impl From<Status> for Outcome {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Outcome::Success,
            Status::CompletedWithErrors => Outcome::CompletedWithErrors,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Empty => "Nothing to run.",
            Outcome::Success => "Execution successful.",
            Outcome::CompletedWithErrors => "Execution completed with errors.",
            Outcome::ParseFailed => "Parsing failed.",
        })
    }
}

/// Settings for [`run_with`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// See [`Interpreter::with_step_limit`]. `None` runs without limit.
    pub step_limit: Option<u64>,
    /// Print the parsed program to stderr before running it.
    pub dump_ast: bool,
}

/// Parses and runs `content`, writing program output and diagnostics to `out`.
pub fn run(content: &str, out: impl Write) -> Result<Outcome, ExecError> {
    run_with(content, &RunOptions::default(), out)
}

pub fn run_with(
    content: &str,
    options: &RunOptions,
    mut out: impl Write,
) -> Result<Outcome, ExecError> {
    let source = Source::new(content);
    if source.is_blank() {
        return Ok(Outcome::Empty);
    }

    let program = match Parser::new(&source).parse_program() {
        Some(program) => program,
        None => {
            write!(out, "{}", source.errors)?;
            return Ok(Outcome::ParseFailed);
        }
    };
    if options.dump_ast {
        eprint!("{}", program);
    }

    let mut interpreter = Interpreter::new(out);
    if let Some(limit) = options.step_limit {
        interpreter = interpreter.with_step_limit(limit);
    }
    let status = interpreter.run(&program)?;
    Ok(status.into())
}
