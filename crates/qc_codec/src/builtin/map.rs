use std::sync::Arc;

use qc_stream::{TokenReader, TokenWriter};
use qc_utils::hash::HashSet;

use crate::Value;
use crate::codec::{Codec, CodecRef, DecodeError, EncodeError};
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::{RawType, TypeKey};

/// String-keyed maps as JSON objects, unqualified only.
///
/// The key argument must be an unqualified `String`; the value codec is
/// resolved from the value key.
pub(crate) struct MapFactory;

impl CodecFactory for MapFactory {
    fn try_create(
        &self,
        key: &TypeKey,
        resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        if !key.raw_type_matches(RawType::MAP) || !key.is_unqualified() {
            return Ok(None);
        }
        let [name, value] = key.args() else {
            return Err(ResolveError::InvalidKey {
                key: key.clone(),
                reason: "a map takes exactly two type arguments",
            });
        };
        if *name != TypeKey::of(RawType::STRING) {
            return Err(ResolveError::InvalidKey {
                key: key.clone(),
                reason: "map keys must be unqualified strings",
            });
        }
        let value = resolver.codec_for(value)?;
        Ok(Some(Arc::new(MapCodec { value })))
    }

    fn name(&self) -> &'static str {
        "map"
    }
}

struct MapCodec {
    value: CodecRef,
}

impl Codec for MapCodec {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        let mut members = Vec::new();
        let mut seen: HashSet<String> = HashSet::default();
        reader.begin_object()?;
        while reader.has_next()? {
            let name = reader.next_name()?;
            if !seen.insert(name.clone()) {
                return Err(DecodeError::invalid(
                    reader.path(),
                    format!("duplicate key `{name}`"),
                ));
            }
            let value = self.value.decode(reader)?;
            members.push((name, value));
        }
        reader.end_object()?;
        Ok(Value::Object(members))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        let Value::Object(members) = value else {
            return Err(EncodeError::unexpected("object", value, writer.path()));
        };
        writer.begin_object()?;
        for (name, member) in members {
            writer.name(name)?;
            self.value.encode(writer, member)?;
        }
        writer.end_object()?;
        Ok(())
    }
}
