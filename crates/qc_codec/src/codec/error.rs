use qc_stream::StreamError;
use thiserror::Error;

use crate::Value;

// -----------------------------------------------------------------------------
// DecodeError

/// A codec could not produce a [`Value`] from the input stream.
///
/// Decode errors are per call; they never invalidate a cached codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error("missing field `{field}` at `{path}`")]
    MissingField { field: String, path: String },
    #[error("invalid value at `{path}`: {reason}")]
    Invalid { path: String, reason: String },
}

impl DecodeError {
    /// Creates an [`DecodeError::Invalid`] at `path`.
    pub fn invalid(path: String, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path,
            reason: reason.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// EncodeError

/// A codec could not write a [`Value`] to the output stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error("expected {expected} but found {found} at `{path}`")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
        path: String,
    },
    #[error("missing field `{field}` at `{path}`")]
    MissingField { field: String, path: String },
    #[error("invalid value at `{path}`: {reason}")]
    Invalid { path: String, reason: String },
}

impl EncodeError {
    /// Creates an [`EncodeError::UnexpectedValue`] for `found` at `path`.
    pub fn unexpected(expected: &'static str, found: &Value, path: String) -> Self {
        Self::UnexpectedValue {
            expected,
            found: found.kind(),
            path,
        }
    }

    /// Creates an [`EncodeError::Invalid`] at `path`.
    pub fn invalid(path: String, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path,
            reason: reason.into(),
        }
    }
}
