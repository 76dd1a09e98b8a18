use std::sync::Arc;

use qc_stream::{Token, TokenReader, TokenWriter};

use crate::Value;
use crate::codec::{Codec, CodecRef, DecodeError, EncodeError};

/// Handles `null` around an inner codec.
///
/// `null` decodes to [`Value::Null`] and [`Value::Null`] encodes to `null`
/// without reaching the inner codec; everything else is forwarded.
///
/// # Examples
///
/// ```
/// use qc_codec::{CodecEngine, CodecExt, NullSafe, RawType, TypeKey, Value};
///
/// let engine = CodecEngine::builder().build();
/// let string = engine.codec_for(&TypeKey::of(RawType::STRING)).unwrap();
/// let nullable = NullSafe::wrap(string);
///
/// assert_eq!(nullable.from_json("null").unwrap(), Value::Null);
/// assert_eq!(nullable.to_json(&Value::from("a")).unwrap(), r#""a""#);
/// ```
pub struct NullSafe {
    inner: CodecRef,
}

impl NullSafe {
    /// Wraps `inner` into a shared null-safe codec.
    pub fn wrap(inner: CodecRef) -> CodecRef {
        Arc::new(Self { inner })
    }
}

impl Codec for NullSafe {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        if reader.peek()? == Token::Null {
            reader.next_null()?;
            return Ok(Value::Null);
        }
        self.inner.decode(reader)
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Null => Ok(writer.null_value()?),
            other => self.inner.encode(writer, other),
        }
    }
}
