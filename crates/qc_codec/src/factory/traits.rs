use crate::codec::CodecRef;
use crate::engine::{ResolveError, Resolver};
use crate::key::TypeKey;

// -----------------------------------------------------------------------------
// CodecFactory

/// A strategy that may produce a [`Codec`] for a [`TypeKey`], or decline.
///
/// Factories are registered once on an [`EngineBuilder`] and asked in
/// registration order; the first one returning `Ok(Some(_))` wins.
///
/// - `Ok(None)` is not an error: it defers to the next factory.
/// - `Err(_)` aborts the resolution; use it for keys the factory claims but
///   cannot serve, and propagate errors from nested resolutions.
///
/// The [`Resolver`] lets a factory resolve other keys (element types, or the
/// same type with one qualifier consumed) and compose their codecs.
///
/// # Examples
///
/// ```
/// use qc_codec::{
///     CodecEngine, CodecExt, CodecFactory, CodecRef, NullSafe, RawType, ResolveError,
///     Resolver, TypeKey, Value,
/// };
///
/// /// Makes every unqualified `String` nullable.
/// struct NullableStrings;
///
/// impl CodecFactory for NullableStrings {
///     fn try_create(
///         &self,
///         key: &TypeKey,
///         resolver: &Resolver<'_>,
///     ) -> Result<Option<CodecRef>, ResolveError> {
///         if !key.raw_type_matches(RawType::STRING) || !key.is_unqualified() {
///             return Ok(None);
///         }
///         // Asking for `key` again would be a cycle; ask the factories
///         // registered after this one instead.
///         let plain = resolver.next_codec_for(self, key)?;
///         Ok(Some(NullSafe::wrap(plain)))
///     }
/// }
///
/// let engine = CodecEngine::builder().add(NullableStrings).build();
/// let codec = engine.codec_for(&TypeKey::of(RawType::STRING)).unwrap();
///
/// assert_eq!(codec.from_json("null").unwrap(), Value::Null);
/// assert_eq!(codec.from_json(r#""a""#).unwrap(), Value::from("a"));
/// ```
///
/// [`Codec`]: crate::Codec
/// [`EngineBuilder`]: crate::EngineBuilder
pub trait CodecFactory: Send + Sync + 'static {
    /// Builds a codec for `key`, or returns `Ok(None)` if the key is not
    /// handled by this factory.
    fn try_create(
        &self,
        key: &TypeKey,
        resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError>;

    /// A name used in log records.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
