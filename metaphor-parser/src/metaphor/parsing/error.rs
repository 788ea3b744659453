//! Parse errors
//!
//!     Every problem found while parsing becomes a [`SyntaxError`] positioned at the token
//!     that triggered it. A failed parse returns all of them together as [`ParseErrors`].

use crate::metaphor::token::Token;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One positioned problem, with the source line needed for caret rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub message: String,
    pub filename: String,
    /// 1-based; 0 when the error has no source position (e.g. a missing entry file).
    pub line: usize,
    pub column: usize,
    pub source_line: String,
}

impl SyntaxError {
    pub fn new(
        message: impl Into<String>,
        filename: impl Into<String>,
        line: usize,
        column: usize,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            filename: filename.into(),
            line,
            column,
            source_line: source_line.into(),
        }
    }

    /// An error positioned at `token`.
    pub fn at(message: impl Into<String>, token: &Token) -> Self {
        Self::new(
            message,
            token.filename.clone(),
            token.line,
            token.column,
            token.raw_line.clone(),
        )
    }

    /// An error about a whole file rather than a place in it.
    pub fn unpositioned(message: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::new(message, filename, 0, 0, "")
    }

    pub fn is_positioned(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_positioned() {
            return write!(f, "{}: file {}", self.message, self.filename);
        }

        let caret = " ".repeat(self.column.saturating_sub(1));
        write!(
            f,
            "{}: line {}, column {}, file {}\n{caret}|\n{caret}v\n{}",
            self.message, self.line, self.column, self.filename, self.source_line
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Everything that went wrong in one parse, in the order it was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} syntax error(s), first: {}", .0.len(), first_message(.0))]
pub struct ParseErrors(pub Vec<SyntaxError>);

fn first_message(errors: &[SyntaxError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("")
}

impl ParseErrors {
    pub fn new(errors: Vec<SyntaxError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyntaxError> {
        self.0.iter()
    }

    /// True if any error carries exactly this message.
    pub fn contains_message(&self, message: &str) -> bool {
        self.0.iter().any(|e| e.message == message)
    }
}

impl IntoIterator for ParseErrors {
    type Item = SyntaxError;
    type IntoIter = std::vec::IntoIter<SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
