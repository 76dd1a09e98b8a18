use thiserror::Error;

use crate::Token;

/// Failures raised by a [`TokenReader`](crate::TokenReader) or
/// [`TokenWriter`](crate::TokenWriter).
///
/// Each variant carries the stream path where it happened.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// The input text is not valid JSON.
    #[error("malformed input at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    /// The next token is not the kind the caller asked for.
    #[error("expected {expected} but found {found} at `{path}`")]
    UnexpectedToken {
        expected: Token,
        found: Token,
        path: String,
    },
    /// A number cannot be represented by the requested type.
    #[error("number {value} does not fit {target} at `{path}`")]
    NumberOutOfRange {
        value: String,
        target: &'static str,
        path: String,
    },
    /// NaN and infinities have no JSON representation.
    #[error("non-finite number {value} at `{path}`")]
    NonFinite { value: f64, path: String },
    /// A writer call would produce unbalanced or misplaced structure.
    #[error("unbalanced structure at `{path}`: {reason}")]
    Unbalanced { reason: &'static str, path: String },
    /// The stream ended while a structure was still open.
    #[error("incomplete document at `{path}`")]
    Incomplete { path: String },
    /// Tokens remain after the top-level value.
    #[error("trailing tokens after the document at `{path}`")]
    TrailingTokens { path: String },
}

impl StreamError {
    /// Returns the path recorded in the error, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Syntax { .. } => None,
            Self::UnexpectedToken { path, .. }
            | Self::NumberOutOfRange { path, .. }
            | Self::NonFinite { path, .. }
            | Self::Unbalanced { path, .. }
            | Self::Incomplete { path }
            | Self::TrailingTokens { path } => Some(path),
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
