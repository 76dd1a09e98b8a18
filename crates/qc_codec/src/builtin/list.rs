use std::sync::Arc;

use qc_stream::{TokenReader, TokenWriter};

use crate::Value;
use crate::codec::{Codec, CodecRef, DecodeError, EncodeError};
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::{RawType, TypeKey};

/// `Vec<T>` as a JSON array, unqualified only.
///
/// The element codec is resolved from the element key, with the element's
/// own qualifiers.
pub(crate) struct ListFactory;

impl CodecFactory for ListFactory {
    fn try_create(
        &self,
        key: &TypeKey,
        resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        if !key.raw_type_matches(RawType::LIST) || !key.is_unqualified() {
            return Ok(None);
        }
        let [element] = key.args() else {
            return Err(ResolveError::InvalidKey {
                key: key.clone(),
                reason: "a list takes exactly one type argument",
            });
        };
        let element = resolver.codec_for(element)?;
        Ok(Some(Arc::new(ListCodec { element })))
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

struct ListCodec {
    element: CodecRef,
}

impl Codec for ListCodec {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        reader.begin_array()?;
        while reader.has_next()? {
            items.push(self.element.decode(reader)?);
        }
        reader.end_array()?;
        Ok(Value::List(items))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        let Value::List(items) = value else {
            return Err(EncodeError::unexpected("list", value, writer.path()));
        };
        writer.begin_array()?;
        for item in items {
            self.element.encode(writer, item)?;
        }
        writer.end_array()?;
        Ok(())
    }
}
