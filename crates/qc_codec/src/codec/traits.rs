use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use qc_stream::{JsonReader, JsonWriter, TokenReader, TokenWriter};

use crate::Value;
use crate::codec::{DecodeError, EncodeError};

// -----------------------------------------------------------------------------
// Codec

/// Paired decode and encode logic for one [`TypeKey`].
///
/// A resolved codec is shared by every caller asking for the same key, from
/// any thread, so implementations must not keep mutable state. Codecs built
/// for composed types hold the nested codecs they obtained at construction
/// time and never resolve anything per call.
///
/// # Examples
///
/// ```
/// use qc_codec::{Codec, CodecExt, DecodeError, EncodeError, Value};
/// use qc_stream::{TokenReader, TokenWriter};
///
/// /// Writes booleans as `0` and `1`.
/// struct BitCodec;
///
/// impl Codec for BitCodec {
///     fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
///         Ok(Value::Bool(reader.next_int()? != 0))
///     }
///
///     fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
///         match value {
///             Value::Bool(b) => Ok(writer.int_value(i64::from(*b))?),
///             other => Err(EncodeError::unexpected("bool", other, writer.path())),
///         }
///     }
/// }
///
/// assert_eq!(BitCodec.to_json(&Value::Bool(true)).unwrap(), "1");
/// assert_eq!(BitCodec.from_json("0").unwrap(), Value::Bool(false));
/// ```
///
/// [`TypeKey`]: crate::TypeKey
pub trait Codec: Send + Sync + 'static {
    /// Reads one value from `reader`.
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError>;

    /// Writes `value` to `writer`.
    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError>;
}

/// A shared, type-erased [`Codec`].
pub type CodecRef = Arc<dyn Codec>;

impl Debug for dyn Codec {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Codec")
    }
}

// -----------------------------------------------------------------------------
// CodecExt

/// JSON text helpers for every [`Codec`].
pub trait CodecExt: Codec {
    /// Encodes `value` as a compact JSON document.
    ///
    /// Null object members are dropped, see [`JsonWriter`].
    fn to_json(&self, value: &Value) -> Result<String, EncodeError> {
        let mut writer = JsonWriter::new();
        self.encode(&mut writer, value)?;
        Ok(writer.finish()?)
    }

    /// Decodes a whole JSON document.
    ///
    /// Fails if anything remains after the decoded value.
    fn from_json(&self, text: &str) -> Result<Value, DecodeError> {
        let mut reader = JsonReader::parse(text)?;
        let value = self.decode(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

impl<C: Codec + ?Sized> CodecExt for C {}

// -----------------------------------------------------------------------------
// Tests
