use crate::codec::{CodecRef, NullSafe};
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::{RawType, TypeKey};

/// `Option<T>`: the codec of `T` made [`NullSafe`], unqualified only.
pub(crate) struct OptionFactory;

impl CodecFactory for OptionFactory {
    fn try_create(
        &self,
        key: &TypeKey,
        resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        if !key.raw_type_matches(RawType::OPTION) || !key.is_unqualified() {
            return Ok(None);
        }
        let [inner] = key.args() else {
            return Err(ResolveError::InvalidKey {
                key: key.clone(),
                reason: "an option takes exactly one type argument",
            });
        };
        Ok(Some(NullSafe::wrap(resolver.codec_for(inner)?)))
    }

    fn name(&self) -> &'static str {
        "option"
    }
}
