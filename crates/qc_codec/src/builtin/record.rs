use std::sync::Arc;

use qc_stream::{TokenReader, TokenWriter};

use crate::Value;
use crate::codec::{Codec, CodecRef, DecodeError, EncodeError};
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::{RawType, TypeKey};

// -----------------------------------------------------------------------------
// StructFactory

/// Records described by a registered [`StructInfo`], unqualified and
/// non-generic only.
///
/// Each field codec is resolved from the field key, which carries the
/// qualifiers attached at the field.
///
/// [`StructInfo`]: crate::StructInfo
pub(crate) struct StructFactory;

impl CodecFactory for StructFactory {
    fn try_create(
        &self,
        key: &TypeKey,
        resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        if !key.is_unqualified() || key.is_generic() {
            return Ok(None);
        }
        let Some(info) = resolver.types().get(key.raw()) else {
            return Ok(None);
        };

        let fields = info
            .fields()
            .iter()
            .map(|field| -> Result<FieldCodec, ResolveError> {
                Ok(FieldCodec {
                    name: field.name(),
                    optional: field.key().raw_type_matches(RawType::OPTION),
                    codec: resolver.codec_for(field.key())?,
                })
            })
            .collect::<Result<Box<[_]>, _>>()?;

        Ok(Some(Arc::new(RecordCodec { fields })))
    }

    fn name(&self) -> &'static str {
        "struct"
    }
}

// -----------------------------------------------------------------------------
// RecordCodec

struct FieldCodec {
    name: &'static str,
    /// Absent members decode to null and null members may be dropped.
    optional: bool,
    codec: CodecRef,
}

/// Objects with a fixed set of named members, in declaration order.
///
/// Unknown input members are skipped. A missing member is an error unless
/// the field is an `Option`.
struct RecordCodec {
    fields: Box<[FieldCodec]>,
}

impl RecordCodec {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

impl Codec for RecordCodec {
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
        let mut slots: Vec<Option<Value>> = vec![None; self.fields.len()];

        reader.begin_object()?;
        let path = reader.path();
        while reader.has_next()? {
            let name = reader.next_name()?;
            let Some(index) = self.index_of(&name) else {
                reader.skip_value()?;
                continue;
            };
            if slots[index].is_some() {
                return Err(DecodeError::invalid(
                    reader.path(),
                    format!("duplicate field `{name}`"),
                ));
            }
            slots[index] = Some(self.fields[index].codec.decode(reader)?);
        }
        reader.end_object()?;

        let mut members = Vec::with_capacity(self.fields.len());
        for (field, slot) in self.fields.iter().zip(slots) {
            let value = match slot {
                Some(value) => value,
                None if field.optional => Value::Null,
                None => {
                    return Err(DecodeError::MissingField {
                        field: field.name.to_owned(),
                        path,
                    });
                }
            };
            members.push((field.name.to_owned(), value));
        }
        Ok(Value::Object(members))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
        let Value::Object(members) = value else {
            return Err(EncodeError::unexpected("object", value, writer.path()));
        };
        if let Some((name, _)) = members.iter().find(|(name, _)| self.index_of(name).is_none()) {
            return Err(EncodeError::invalid(
                writer.path(),
                format!("unknown field `{name}`"),
            ));
        }

        if let Some(field) = self
            .fields
            .iter()
            .find(|field| !field.optional && value.get(field.name).is_none())
        {
            return Err(EncodeError::MissingField {
                field: field.name.to_owned(),
                path: writer.path(),
            });
        }

        writer.begin_object()?;
        for field in &self.fields {
            writer.name(field.name)?;
            match value.get(field.name) {
                Some(member) => field.codec.encode(writer, member)?,
                None => writer.null_value()?,
            }
        }
        writer.end_object()?;
        Ok(())
    }
}
