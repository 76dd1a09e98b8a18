use crate::codec::CodecRef;
use crate::engine::{ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::{Qualifier, RawType, TypeKey};

/// Consumes one qualifier and wraps the codec of the remainder.
///
/// The factory matches any key of the given raw type holding its qualifier,
/// whatever else the key holds. It resolves the same key with that one
/// qualifier removed, then applies `wrap` to the inner codec.
///
/// Several qualifiers on one key therefore compose as nested wrappers. The
/// factory registered first is asked first, so it produces the outermost
/// wrapper: with `[Lowercase, BarPostFix]` registered, a
/// `@BarPostFix @Lowercase String` encodes through `Lowercase` first and
/// decodes through it last.
///
/// Element qualifiers are not seen here: they belong to the nested
/// argument keys and are resolved by the container codec.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use qc_codec::{CodecEngine, CodecExt, CodecRef, Qualifier, QualifierFactory, RawType, TypeKey, Value};
///
/// const TWICE: Qualifier = Qualifier::new("Twice");
///
/// // A wrapper that changes nothing, only to show the delegation.
/// let factory = QualifierFactory::new(RawType::STRING, TWICE, |inner| inner);
/// let engine = CodecEngine::builder().add(factory).build();
///
/// let plain = engine.codec_for(&TypeKey::of(RawType::STRING)).unwrap();
/// let twice = engine.codec_for(&TypeKey::of(RawType::STRING).qualified(TWICE)).unwrap();
/// assert!(Arc::ptr_eq(&plain, &twice));
/// assert_eq!(twice.to_json(&Value::from("x")).unwrap(), r#""x""#);
/// ```
pub struct QualifierFactory<W> {
    raw: RawType,
    qualifier: Qualifier,
    wrap: W,
}

impl<W> QualifierFactory<W>
where
    W: Fn(CodecRef) -> CodecRef + Send + Sync + 'static,
{
    pub fn new(raw: RawType, qualifier: Qualifier, wrap: W) -> Self {
        Self {
            raw,
            qualifier,
            wrap,
        }
    }

    /// Returns the consumed qualifier.
    #[inline]
    pub fn qualifier(&self) -> Qualifier {
        self.qualifier
    }
}

impl<W> CodecFactory for QualifierFactory<W>
where
    W: Fn(CodecRef) -> CodecRef + Send + Sync + 'static,
{
    fn try_create(
        &self,
        key: &TypeKey,
        resolver: &Resolver<'_>,
    ) -> Result<Option<CodecRef>, ResolveError> {
        if !key.raw_type_matches(self.raw) || !key.qualifiers().contains(self.qualifier) {
            return Ok(None);
        }
        let inner = resolver.codec_for(&key.without(self.qualifier)?)?;
        Ok(Some((self.wrap)(inner)))
    }

    fn name(&self) -> &'static str {
        self.qualifier.name()
    }
}
