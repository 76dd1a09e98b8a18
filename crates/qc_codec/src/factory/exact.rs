use crate::codec::CodecRef;
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::TypeKey;

/// Serves one fixed codec for exactly one [`TypeKey`].
///
/// The key must match entirely: raw type, generic arguments and the exact
/// qualifier set. A codec registered for `@A String` is not used for
/// `@A @B String`, nor for plain `String`.
///
/// Usually created through [`EngineBuilder::add_codec`].
///
/// [`EngineBuilder::add_codec`]: crate::EngineBuilder::add_codec
pub struct ExactFactory {
    key: TypeKey,
    codec: CodecRef,
}

impl ExactFactory {
    #[inline]
    pub fn new(key: TypeKey, codec: CodecRef) -> Self {
        Self { key, codec }
    }

    /// Returns the served key.
    #[inline]
    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

impl CodecFactory for ExactFactory {
    fn try_create(
        &self,
        key: &TypeKey,
        _resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        if *key == self.key {
            Ok(Some(self.codec.clone()))
        } else {
            Ok(None)
        }
    }
}
