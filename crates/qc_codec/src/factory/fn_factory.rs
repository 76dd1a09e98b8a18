use crate::codec::CodecRef;
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::TypeKey;

/// A [`CodecFactory`] backed by a closure, see [`from_fn`].
pub struct FnFactory<F> {
    func: F,
}

/// Turns a closure into a [`CodecFactory`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use qc_codec::{factory, CodecEngine, CodecRef, RawType, TypeKey};
///
/// const ID: RawType = RawType::new("my_app::Id");
///
/// let engine = CodecEngine::builder()
///     .add(factory::from_fn(|key, resolver| {
///         if !key.raw_type_matches(ID) || !key.is_unqualified() {
///             return Ok(None);
///         }
///         // Ids are plain strings on the wire.
///         resolver.codec_for(&TypeKey::of(RawType::STRING)).map(Some)
///     }))
///     .build();
///
/// let id: CodecRef = engine.codec_for(&TypeKey::of(ID)).unwrap();
/// let string = engine.codec_for(&TypeKey::of(RawType::STRING)).unwrap();
/// assert!(Arc::ptr_eq(&id, &string));
/// ```
pub fn from_fn<F>(func: F) -> FnFactory<F>
where
    F: Fn(&TypeKey, &Resolver<'_>) -> Result<Option<CodecRef>, ResolveError>
        + Send
        + Sync
        + 'static,
{
    FnFactory { func }
}

impl<F> CodecFactory for FnFactory<F>
where
    F: Fn(&TypeKey, &Resolver<'_>) -> Result<Option<CodecRef>, ResolveError>
        + Send
        + Sync
        + 'static,
{
    #[inline]
    fn try_create(
        &self,
        key: &TypeKey,
        resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        (self.func)(key, resolver)
    }

    fn name(&self) -> &'static str {
        core::any::type_name::<F>()
    }
}
