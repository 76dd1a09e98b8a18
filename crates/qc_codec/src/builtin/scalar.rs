use std::sync::Arc;

use qc_stream::{StreamError, TokenReader, TokenWriter};

use crate::Value;
use crate::codec::{Codec, CodecRef, DecodeError, EncodeError};
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::{RawType, TypeKey};

// -----------------------------------------------------------------------------
// ScalarFactory

/// `bool`, `i32`, `i64`, `u32`, `f64` and `String`, unqualified only.
pub(crate) struct ScalarFactory;

impl CodecFactory for ScalarFactory {
    fn try_create(
        &self,
        key: &TypeKey,
        _resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        if !key.is_unqualified() {
            return Ok(None);
        }

        let codec: CodecRef = match key.raw() {
            RawType::BOOL => Arc::new(BoolCodec),
            RawType::I32 => Arc::new(IntCodec::of("i32", i32::MIN.into(), i32::MAX.into())),
            RawType::I64 => Arc::new(IntCodec::of("i64", i64::MIN, i64::MAX)),
            RawType::U32 => Arc::new(IntCodec::of("u32", 0, u32::MAX.into())),
            RawType::F64 => Arc::new(FloatCodec),
            RawType::STRING => Arc::new(StringCodec),
            _ => return Ok(None),
        };

        if key.is_generic() {
            return Err(ResolveError::InvalidKey {
                key: key.clone(),
                reason: "scalar types take no type arguments",
            });
        }
        Ok(Some(codec))
    }

    fn name(&self) -> &'static str {
        "scalar"
    }
}

// -----------------------------------------------------------------------------
// Codecs

struct BoolCodec;

impl Codec for BoolCodec {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        Ok(Value::Bool(reader.next_bool()?))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Bool(b) => Ok(writer.bool_value(*b)?),
            other => Err(EncodeError::unexpected("bool", other, writer.path())),
        }
    }
}

/// An integer restricted to `min..=max`.
struct IntCodec {
    target: &'static str,
    min: i64,
    max: i64,
}

impl IntCodec {
    const fn of(target: &'static str, min: i64, max: i64) -> Self {
        Self { target, min, max }
    }

    #[inline]
    fn fits(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Codec for IntCodec {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        let path = reader.path();
        let value = reader.next_int()?;
        if !self.fits(value) {
            return Err(StreamError::NumberOutOfRange {
                value: value.to_string(),
                target: self.target,
                path,
            }
            .into());
        }
        Ok(Value::Int(value))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Int(i) if self.fits(*i) => Ok(writer.int_value(*i)?),
            Value::Int(i) => Err(EncodeError::invalid(
                writer.path(),
                format!("{i} does not fit {}", self.target),
            )),
            other => Err(EncodeError::unexpected("int", other, writer.path())),
        }
    }
}

struct FloatCodec;

impl Codec for FloatCodec {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        Ok(Value::Float(reader.next_float()?))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Float(f) => Ok(writer.float_value(*f)?),
            Value::Int(i) => Ok(writer.float_value(*i as f64)?),
            other => Err(EncodeError::unexpected("float", other, writer.path())),
        }
    }
}

struct StringCodec;

impl Codec for StringCodec {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        Ok(Value::String(reader.next_string()?))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::String(s) => Ok(writer.string_value(s)?),
            other => Err(EncodeError::unexpected("string", other, writer.path())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
