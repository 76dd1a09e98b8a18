use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::builtin;
use crate::codec::CodecRef;
use crate::engine::CodecEngine;
use crate::factory::{CodecFactory, ExactFactory};
use crate::key::TypeKey;
use crate::meta::{StructInfo, TypeTable};

// -----------------------------------------------------------------------------
// EngineBuilder

/// Collects factories and struct metadata, then freezes them into a
/// [`CodecEngine`].
///
/// Factories are asked in the order they were added, before the built-in
/// ones. Registration order is significant: the first match wins even if a
/// later factory would also match.
///
/// # Examples
///
/// ```
/// use qc_codec::{CodecEngine, CodecExt, RawType, StructInfo, TypeKey};
///
/// const POINT: RawType = RawType::new("my_app::Point");
///
/// let engine = CodecEngine::builder()
///     .add_struct(
///         StructInfo::new(POINT)
///             .with_field("x", TypeKey::of(RawType::I32))
///             .with_field("y", TypeKey::of(RawType::I32)),
///     )
///     .build();
///
/// let codec = engine.codec_for(&TypeKey::of(POINT)).unwrap();
/// let point = codec.from_json(r#"{"y":2,"x":1}"#).unwrap();
/// assert_eq!(codec.to_json(&point).unwrap(), r#"{"x":1,"y":2}"#);
/// ```
#[derive(Clone, Default)]
pub struct EngineBuilder {
    factories: Vec<Arc<dyn CodecFactory>>,
    types: TypeTable,
}

impl EngineBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(factories: Vec<Arc<dyn CodecFactory>>, types: TypeTable) -> Self {
        Self { factories, types }
    }

    /// Appends `factory`.
    pub fn add<F: CodecFactory>(self, factory: F) -> Self {
        self.add_arc(Arc::new(factory))
    }

    /// Appends an already shared factory.
    pub fn add_arc(mut self, factory: Arc<dyn CodecFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    /// Serves `codec` for exactly `key`, see [`ExactFactory`].
    pub fn add_codec(self, key: TypeKey, codec: CodecRef) -> Self {
        self.add(ExactFactory::new(key, codec))
    }

    /// Registers struct metadata for the built-in record factory.
    ///
    /// A later registration for the same raw type replaces the earlier one.
    pub fn add_struct(mut self, info: StructInfo) -> Self {
        if let Some(old) = self.types.insert(info) {
            log::debug!("replaced the struct metadata of {:?}", old.raw());
        }
        self
    }

    /// Registers every struct submitted with [`submit_struct!`].
    ///
    /// Requires the `auto_register` feature; without it this does nothing.
    /// Explicit [`add_struct`](Self::add_struct) calls made afterwards win.
    ///
    /// [`submit_struct!`]: crate::submit_struct
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(self) -> Self {
        #[cfg(feature = "auto_register")]
        let this = crate::meta::registered_structs().fold(self, Self::add_struct);
        #[cfg(not(feature = "auto_register"))]
        let this = self;
        this
    }

    /// Returns the number of user factories added so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Freezes the configuration. The built-in factories are appended after
    /// the user ones.
    pub fn build(self) -> CodecEngine {
        let user_factories = self.factories.len();
        let mut factories = self.factories;
        factories.extend(builtin::factories());
        CodecEngine::from_parts(factories, user_factories, self.types)
    }
}

impl Debug for EngineBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBuilder")
            .field(
                "factories",
                &self.factories.iter().map(|factory| factory.name()).collect::<Vec<_>>(),
            )
            .field("types", &self.types)
            .finish()
    }
}
