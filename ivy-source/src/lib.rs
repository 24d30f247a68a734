//! Source code representation and error management.

use std::{cell::RefCell, fmt, ops::Range};
use thiserror::Error;

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            errors: ErrorReporter::new(),
            line_starts,
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if the content is empty or only contains whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Maps a byte offset into a 1-based line/column [`Position`].
    /// Offsets past the end of the content are clamped to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self
            .content
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        Position {
            line,
            column: column + 1,
        }
    }

    /// Position just after the last character. Used for end of input diagnostics.
    pub fn end_position(&self) -> Position {
        self.position(self.content.len())
    }

    /// Create a [`SyntaxError`] located at the start of `span`.
    pub fn error_at(&self, message: impl ToString, span: Range<usize>) -> SyntaxError {
        let position = self.position(span.start);
        SyntaxError::new(message, span, position)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// A 1-based line and column in the source code. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents a syntax error (compile time error).
/// Lexical errors are reported as syntax errors as well.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {position}")]
pub struct SyntaxError {
    message: String,
    span: Range<usize>,
    position: Position,
}

impl SyntaxError {
    /// Create a new syntax error with the specified `message`, `span` and `position`.
    pub fn new(message: impl ToString, span: Range<usize>, position: Position) -> Self {
        Self {
            message: message.to_string(),
            span,
            position,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<SyntaxError>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add_error(&self, error: SyntaxError) {
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    /// Returns a copy of all the accumulated errors, in the order they were reported.
    pub fn to_vec(&self) -> Vec<SyntaxError> {
        self.errors.borrow().clone()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(f, "ERROR: {}", error)?;
        }

        Ok(())
    }
}
