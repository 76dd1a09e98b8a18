use core::fmt;

use crate::StreamError;

// -----------------------------------------------------------------------------
// Token

/// The kind of the next token in a stream, as reported by [`TokenReader::peek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    /// A property name inside an object.
    Name,
    String,
    Number,
    Bool,
    Null,
    /// No tokens remain.
    EndDocument,
}

impl Token {
    /// Returns a lowercase description used in error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::BeginArray => "begin array",
            Self::EndArray => "end array",
            Self::BeginObject => "begin object",
            Self::EndObject => "end object",
            Self::Name => "name",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
            Self::EndDocument => "end of document",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

// -----------------------------------------------------------------------------
// TokenReader

/// Pull-style access to a structured token stream.
///
/// Every `next_*`/`begin_*`/`end_*` call consumes exactly one token and fails
/// with [`StreamError::UnexpectedToken`] when the next token has another kind.
pub trait TokenReader {
    fn begin_array(&mut self) -> Result<(), StreamError>;

    fn end_array(&mut self) -> Result<(), StreamError>;

    fn begin_object(&mut self) -> Result<(), StreamError>;

    fn end_object(&mut self) -> Result<(), StreamError>;

    /// Consumes a property name.
    fn next_name(&mut self) -> Result<String, StreamError>;

    fn next_string(&mut self) -> Result<String, StreamError>;

    /// Consumes a number that is integral and fits in `i64`.
    fn next_int(&mut self) -> Result<i64, StreamError>;

    fn next_float(&mut self) -> Result<f64, StreamError>;

    fn next_bool(&mut self) -> Result<bool, StreamError>;

    fn next_null(&mut self) -> Result<(), StreamError>;

    /// Returns `true` if the current array or object has another element.
    fn has_next(&mut self) -> Result<bool, StreamError>;

    /// Returns the kind of the next token without consuming it.
    fn peek(&mut self) -> Result<Token, StreamError>;

    /// Skips one complete value, nested structure included.
    ///
    /// When the next token is a property name, the name and its value are skipped.
    fn skip_value(&mut self) -> Result<(), StreamError>;

    /// Location of the reader, such as `$.list[1]`.
    fn path(&self) -> String;
}

// -----------------------------------------------------------------------------
// TokenWriter

/// Push-style emission of a structured token stream.
///
/// The output is well formed only if `begin_*`/`end_*` calls are balanced;
/// implementations report violations as [`StreamError::Unbalanced`].
pub trait TokenWriter {
    fn begin_array(&mut self) -> Result<(), StreamError>;

    fn end_array(&mut self) -> Result<(), StreamError>;

    fn begin_object(&mut self) -> Result<(), StreamError>;

    fn end_object(&mut self) -> Result<(), StreamError>;

    /// Writes the property name for the next value in an object.
    fn name(&mut self, name: &str) -> Result<(), StreamError>;

    fn string_value(&mut self, value: &str) -> Result<(), StreamError>;

    fn int_value(&mut self, value: i64) -> Result<(), StreamError>;

    /// Fails with [`StreamError::NonFinite`] for NaN and infinities.
    fn float_value(&mut self, value: f64) -> Result<(), StreamError>;

    fn bool_value(&mut self, value: bool) -> Result<(), StreamError>;

    /// Writes `null`.
    ///
    /// Inside an object, when [`serialize_nulls`](Self::serialize_nulls) is
    /// `false`, the pending name and the null are both dropped.
    fn null_value(&mut self) -> Result<(), StreamError>;

    /// Whether null object members are written.
    fn serialize_nulls(&self) -> bool;

    /// Location of the writer, such as `$.list[1]`.
    fn path(&self) -> String;
}
