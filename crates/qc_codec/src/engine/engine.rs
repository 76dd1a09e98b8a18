use core::fmt::{self, Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock};

use qc_utils::hash::{Hashed, PreHashMap};

use crate::codec::CodecRef;
use crate::engine::{EngineBuilder, ResolveError, Resolver};
use crate::factory::CodecFactory;
use crate::key::TypeKey;
use crate::meta::{Described, TypeTable};

// -----------------------------------------------------------------------------
// CodecEngine

/// Resolves and caches codecs by [`TypeKey`].
///
/// The engine owns a fixed, ordered list of factories (user factories
/// first, then the built-ins), the struct metadata they read, and a cache
/// of resolved codecs. Cache entries are created lazily and never evicted:
/// the set of keys a program uses is bounded by its declared types.
///
/// The engine is `Send + Sync`; share it as `Arc<CodecEngine>`. Concurrent
/// resolutions of different keys never wait for each other, since no lock
/// is held while factories run. Two threads resolving the same key may both
/// build a codec; the first one cached is kept and returned to both.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use qc_codec::{CodecEngine, CodecExt, RawType, TypeKey, Value};
///
/// let engine = CodecEngine::builder().build();
/// let key = TypeKey::generic(RawType::MAP, [
///     TypeKey::of(RawType::STRING),
///     TypeKey::of(RawType::I32),
/// ]);
///
/// let codec = engine.codec_for(&key).unwrap();
/// let value = codec.from_json(r#"{"a":1,"b":2}"#).unwrap();
/// assert_eq!(value.get("b"), Some(&Value::Int(2)));
///
/// // Identity-stable caching.
/// let again = engine.codec_for(&key).unwrap();
/// assert!(Arc::ptr_eq(&codec, &again));
/// ```
pub struct CodecEngine {
    factories: Box<[Arc<dyn CodecFactory>]>,
    user_factories: usize,
    types: TypeTable,
    cache: RwLock<PreHashMap<TypeKey, CodecRef>>,
}

impl Default for CodecEngine {
    /// An engine with the built-in factories only.
    #[inline]
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl CodecEngine {
    /// Creates a builder with no user factories.
    #[inline]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(
        factories: Vec<Arc<dyn CodecFactory>>,
        user_factories: usize,
        types: TypeTable,
    ) -> Self {
        Self {
            factories: factories.into_boxed_slice(),
            user_factories,
            types,
            cache: RwLock::new(PreHashMap::new()),
        }
    }

    /// Returns a builder holding the user factories and struct metadata of
    /// this engine, with an empty cache.
    ///
    /// Further factories are added after the existing ones.
    pub fn to_builder(&self) -> EngineBuilder {
        EngineBuilder::from_parts(
            self.factories[..self.user_factories].to_vec(),
            self.types.clone(),
        )
    }

    /// Returns the codec for `key`.
    ///
    /// On a cache miss the factories are asked in order and the first codec
    /// produced is cached under `key`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NoFactoryMatch`] if every factory declined `key` or
    ///   a key it depends on.
    /// - [`ResolveError::CyclicResolution`] if resolving `key` needs `key`.
    /// - Any error a factory raised.
    pub fn codec_for(&self, key: &TypeKey) -> Result<CodecRef, ResolveError> {
        Resolver::new(self).codec_for(key)
    }

    /// Returns the codec for the Rust type `T`.
    #[inline]
    pub fn codec<T: Described>(&self) -> Result<CodecRef, ResolveError> {
        self.codec_for(&T::type_key())
    }

    /// Returns the struct metadata read by the record factory.
    #[inline]
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Iterates the factories in the order they are asked.
    pub fn factories(&self) -> impl ExactSizeIterator<Item = &dyn CodecFactory> {
        self.factories.iter().map(|factory| &**factory)
    }

    /// Returns the number of cached codecs.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if a codec is cached for `key`.
    pub fn is_cached(&self, key: &TypeKey) -> bool {
        self.lookup(&Hashed::new(key.clone())).is_some()
    }

    #[inline]
    pub(crate) fn registered(&self) -> &[Arc<dyn CodecFactory>] {
        &self.factories
    }

    pub(crate) fn lookup(&self, key: &Hashed<TypeKey>) -> Option<CodecRef> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get_hashed(key)
            .cloned()
    }

    /// Caches `codec` unless a codec is already cached for `key`, and
    /// returns the cached one.
    pub(crate) fn store(&self, key: &Hashed<TypeKey>, codec: CodecRef) -> CodecRef {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache
            .get_or_insert_with(key, || {
                log::debug!("cached the codec for {:?}", &**key);
                codec
            })
            .clone()
    }
}

impl Debug for CodecEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecEngine")
            .field(
                "factories",
                &self.factories().map(|factory| factory.name()).collect::<Vec<_>>(),
            )
            .field("user_factories", &self.user_factories)
            .field("cached", &self.cached_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use qc_stream::{TokenReader, TokenWriter};

    use crate::Value;
    use crate::codec::{Codec, CodecExt, CodecRef, DecodeError, EncodeError};
    use crate::engine::{CodecEngine, EngineBuilder, ResolveError, Resolver};
    use crate::factory::{self, QualifierFactory};
    use crate::key::{Qualifier, QualifierError, RawType, TypeKey};
    use crate::meta::StructInfo;

    // -------------------------------------------------------------------------
    // Qualifiers

    const LOWERCASE: Qualifier = Qualifier::new("Lowercase");
    const BAR_POSTFIX: Qualifier = Qualifier::new("BarPostFix");
    const REVERSED: Qualifier = Qualifier::new("Reversed");

    const FOO: RawType = RawType::new("qc_codec::tests::Foo");
    const TOTO: RawType = RawType::new("qc_codec::tests::Toto");

    /// Lowercases strings before encoding and after decoding.
    struct Lowercase(CodecRef);

    impl Codec for Lowercase {
        fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
            match self.0.decode(reader)? {
                Value::String(s) => Ok(Value::String(s.to_lowercase())),
                other => Ok(other),
            }
        }

        fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
            match value {
                Value::String(s) => self.0.encode(writer, &Value::String(s.to_lowercase())),
                other => self.0.encode(writer, other),
            }
        }
    }

    /// Appends `bar` after decoding and strips it before encoding.
    struct BarPostFix(CodecRef);

    impl Codec for BarPostFix {
        fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
            match self.0.decode(reader)? {
                Value::String(s) => Ok(Value::String(s + "bar")),
                other => Ok(other),
            }
        }

        fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
            match value {
                Value::String(s) => {
                    let stripped = s.strip_suffix("bar").unwrap_or(s);
                    self.0.encode(writer, &Value::from(stripped))
                }
                other => self.0.encode(writer, other),
            }
        }
    }

    /// Reverses lists around the inner codec.
    struct Reversed(CodecRef);

    impl Codec for Reversed {
        fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
            let mut value = self.0.decode(reader)?;
            if let Value::List(items) = &mut value {
                items.reverse();
            }
            Ok(value)
        }

        fn encode(&self, writer: &mut dyn TokenWriter, value: &Value) -> Result<(), EncodeError> {
            match value {
                Value::List(items) => {
                    let reversed = items.iter().rev().cloned().collect();
                    self.0.encode(writer, &Value::List(reversed))
                }
                other => self.0.encode(writer, other),
            }
        }
    }

    fn qualifier_factories() -> EngineBuilder {
        CodecEngine::builder()
            .add(QualifierFactory::new(RawType::STRING, LOWERCASE, |inner| {
                Arc::new(Lowercase(inner)) as CodecRef
            }))
            .add(QualifierFactory::new(RawType::STRING, BAR_POSTFIX, |inner| {
                Arc::new(BarPostFix(inner)) as CodecRef
            }))
            .add(QualifierFactory::new(RawType::LIST, REVERSED, |inner| {
                Arc::new(Reversed(inner)) as CodecRef
            }))
    }

    fn strings() -> TypeKey {
        TypeKey::generic(RawType::LIST, [TypeKey::of(RawType::STRING)])
    }

    fn stacked_strings() -> TypeKey {
        TypeKey::generic(RawType::LIST, [TypeKey::of(RawType::STRING)
            .qualified(BAR_POSTFIX)
            .qualified(LOWERCASE)])
    }

    fn scenario_engine() -> CodecEngine {
        qualifier_factories()
            .add_struct(StructInfo::new(FOO).with_field("list", stacked_strings().qualified(REVERSED)))
            .add_struct(StructInfo::new(TOTO).with_field("list", strings().qualified(REVERSED)))
            .build()
    }

    fn list_value(items: &[&str]) -> Value {
        Value::List(items.iter().copied().map(Value::from).collect())
    }

    fn record(list: &[&str]) -> Value {
        Value::Object(vec![("list".to_owned(), list_value(list))])
    }

    // -------------------------------------------------------------------------
    // Qualifier composition

    #[test]
    fn element_and_container_qualifiers_compose() {
        let engine = scenario_engine();
        let codec = engine.codec_for(&TypeKey::of(FOO)).unwrap();
        assert_eq!(codec.to_json(&record(&["A", "B"])).unwrap(), r#"{"list":["b","a"]}"#);
    }

    #[test]
    fn container_qualifier_alone_reverses() {
        let engine = scenario_engine();
        let codec = engine.codec_for(&TypeKey::of(TOTO)).unwrap();
        assert_eq!(codec.to_json(&record(&["A", "B"])).unwrap(), r#"{"list":["B","A"]}"#);
    }

    #[test]
    fn stacked_decode_applies_wrappers_in_reverse() {
        let engine = scenario_engine();
        let codec = engine.codec_for(&TypeKey::of(FOO)).unwrap();
        // Each element gets `bar` appended and is lowercased, then the list is
        // reversed.
        let value = codec.from_json(r#"{"list":["X","Y"]}"#).unwrap();
        assert_eq!(value, record(&["ybar", "xbar"]));
    }

    #[test]
    fn registration_order_decides_the_outer_wrapper() {
        let key = TypeKey::of(RawType::STRING)
            .qualified(LOWERCASE)
            .qualified(BAR_POSTFIX);

        // Lowercase registered first: it is the outer wrapper, so encoding
        // lowercases before the suffix is stripped.
        let lower_first = qualifier_factories().build();
        let codec = lower_first.codec_for(&key).unwrap();
        assert_eq!(codec.to_json(&Value::from("XBAR")).unwrap(), r#""x""#);
        assert_eq!(codec.from_json(r#""X""#).unwrap(), Value::from("xbar"));

        // BarPostFix registered first: the suffix rule sees `XBAR` and keeps it.
        let bar_first = CodecEngine::builder()
            .add(QualifierFactory::new(RawType::STRING, BAR_POSTFIX, |inner| {
                Arc::new(BarPostFix(inner)) as CodecRef
            }))
            .add(QualifierFactory::new(RawType::STRING, LOWERCASE, |inner| {
                Arc::new(Lowercase(inner)) as CodecRef
            }))
            .build();
        let codec = bar_first.codec_for(&key).unwrap();
        assert_eq!(codec.to_json(&Value::from("XBAR")).unwrap(), r#""xbar""#);
        assert_eq!(codec.from_json(r#""X""#).unwrap(), Value::from("xbar"));
    }

    #[test]
    fn qualified_keys_resolve_directly() {
        let engine = qualifier_factories().build();

        let lower = engine
            .codec_for(&TypeKey::of(RawType::STRING).qualified(LOWERCASE))
            .unwrap();
        assert_eq!(lower.to_json(&Value::from("A")).unwrap(), r#""a""#);

        let reversed = engine.codec_for(&strings().qualified(REVERSED)).unwrap();
        assert_eq!(reversed.to_json(&list_value(&["A", "B"])).unwrap(), r#"["B","A"]"#);
    }

    #[test]
    fn encode_decode_encode_is_stable() {
        let engine = scenario_engine();
        let codec = engine.codec_for(&TypeKey::of(FOO)).unwrap();
        let first = codec.to_json(&record(&["A", "B"])).unwrap();
        let decoded = codec.from_json(&first).unwrap();
        let second = codec.to_json(&decoded).unwrap();
        assert_eq!(first, second);
    }

    // -------------------------------------------------------------------------
    // Caching

    #[test]
    fn cached_codecs_are_identity_stable() {
        let engine = scenario_engine();
        let key = stacked_strings().qualified(REVERSED);
        let first = engine.codec_for(&key).unwrap();
        let second = engine.codec_for(&key).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let plain = engine.codec_for(&strings()).unwrap();
        assert!(!Arc::ptr_eq(&first, &plain));
    }

    #[test]
    fn delegated_keys_are_cached_too() {
        let engine = scenario_engine();
        engine.codec_for(&TypeKey::of(FOO)).unwrap();

        let element = TypeKey::of(RawType::STRING)
            .qualified(BAR_POSTFIX)
            .qualified(LOWERCASE);
        assert!(engine.is_cached(&TypeKey::of(FOO)));
        assert!(engine.is_cached(&stacked_strings().qualified(REVERSED)));
        assert!(engine.is_cached(&stacked_strings()));
        assert!(engine.is_cached(&element));
        assert!(engine.is_cached(&TypeKey::of(RawType::STRING).qualified(BAR_POSTFIX)));
        assert!(engine.is_cached(&TypeKey::of(RawType::STRING)));
        assert_eq!(engine.cached_len(), 6);
    }

    #[test]
    fn failed_resolution_caches_nothing() {
        let engine = qualifier_factories().build();
        let key = TypeKey::of(RawType::I32).qualified(LOWERCASE);
        let err = engine.codec_for(&key).unwrap_err();
        assert!(matches!(err, ResolveError::NoFactoryMatch { .. }));
        assert_eq!(err.key(), Some(&key));
        assert_eq!(engine.cached_len(), 0);
    }

    #[test]
    fn nested_failure_reports_the_innermost_key() {
        const UNKNOWN: Qualifier = Qualifier::new("Unknown");
        let engine = qualifier_factories().build();
        let element = TypeKey::of(RawType::STRING).qualified(UNKNOWN);
        let key = TypeKey::generic(RawType::LIST, [element.clone()]).qualified(REVERSED);

        let err = engine.codec_for(&key).unwrap_err();
        assert_eq!(err.key(), Some(&element));
        #[cfg(feature = "debug")]
        {
            let chain = err.chain().unwrap();
            assert_eq!(chain.keys().first(), Some(&key));
            assert_eq!(chain.keys().last(), Some(&element));
            assert_eq!(chain.keys().len(), 3);
        }
        assert!(!engine.is_cached(&key));
    }

    #[test]
    fn to_builder_keeps_factories_with_a_fresh_cache() {
        let engine = scenario_engine();
        engine.codec_for(&TypeKey::of(FOO)).unwrap();

        let copy = engine.to_builder().build();
        assert_eq!(copy.cached_len(), 0);
        assert_eq!(copy.factories().len(), engine.factories().len());
        let codec = copy.codec_for(&TypeKey::of(FOO)).unwrap();
        assert_eq!(codec.to_json(&record(&["A", "B"])).unwrap(), r#"{"list":["b","a"]}"#);
    }

    // -------------------------------------------------------------------------
    // Matching

    struct Constant(&'static str);

    impl Codec for Constant {
        fn decode(&self, reader: &mut dyn TokenReader) -> Result<Value, DecodeError> {
            reader.skip_value()?;
            Ok(Value::from(self.0))
        }

        fn encode(&self, writer: &mut dyn TokenWriter, _value: &Value) -> Result<(), EncodeError> {
            Ok(writer.string_value(self.0)?)
        }
    }

    #[test]
    fn exact_codecs_match_the_exact_qualifier_set() {
        const Q1: Qualifier = Qualifier::new("Q1");
        const Q2: Qualifier = Qualifier::new("Q2");

        let engine = CodecEngine::builder()
            .add_codec(TypeKey::of(RawType::STRING).qualified(Q1), Arc::new(Constant("q1")))
            .add_codec(
                TypeKey::of(RawType::STRING).qualified(Q2).qualified(Q1),
                Arc::new(Constant("q1q2")),
            )
            .build();

        let q1 = engine.codec_for(&TypeKey::of(RawType::STRING).qualified(Q1)).unwrap();
        let q12 = engine
            .codec_for(&TypeKey::of(RawType::STRING).qualified(Q1).qualified(Q2))
            .unwrap();
        assert_eq!(q1.to_json(&Value::Null).unwrap(), r#""q1""#);
        assert_eq!(q12.to_json(&Value::Null).unwrap(), r#""q1q2""#);

        // Neither a subset nor a superset matches.
        assert!(engine.codec_for(&TypeKey::of(RawType::STRING).qualified(Q2)).is_err());
        let plain = engine.codec_for(&TypeKey::of(RawType::STRING)).unwrap();
        assert_eq!(plain.to_json(&Value::from("x")).unwrap(), r#""x""#);
    }

    #[test]
    fn first_registered_factory_wins() {
        let key = TypeKey::of(RawType::new("qc_codec::tests::Token"));
        let engine = CodecEngine::builder()
            .add_codec(key.clone(), Arc::new(Constant("first")))
            .add_codec(key.clone(), Arc::new(Constant("second")))
            .build();
        let codec = engine.codec_for(&key).unwrap();
        assert_eq!(codec.to_json(&Value::Null).unwrap(), r#""first""#);
    }

    #[test]
    fn user_factories_shadow_builtins() {
        let engine = CodecEngine::builder()
            .add_codec(TypeKey::of(RawType::BOOL), Arc::new(Constant("yes")))
            .build();
        let codec = engine.codec::<Vec<bool>>().unwrap();
        assert_eq!(codec.to_json(&Value::List(vec![Value::Bool(false)])).unwrap(), r#"["yes"]"#);
    }

    // -------------------------------------------------------------------------
    // Misbehaving factories

    #[test]
    fn self_delegation_is_a_cycle() {
        let engine = CodecEngine::builder()
            .add(factory::from_fn(|key, resolver| {
                if key.raw_type_matches(RawType::STRING) {
                    // Asks for the very key being resolved.
                    return resolver.codec_for(key).map(Some);
                }
                Ok(None)
            }))
            .build();

        let key = TypeKey::of(RawType::STRING);
        let err = engine.codec_for(&key).unwrap_err();
        assert!(matches!(err, ResolveError::CyclicResolution { .. }));
        assert_eq!(err.key(), Some(&key));
        assert_eq!(engine.cached_len(), 0);
    }

    #[test]
    fn consuming_an_absent_qualifier_fails_loudly() {
        let engine = CodecEngine::builder()
            .add(factory::from_fn(|key, resolver| {
                if key.raw_type_matches(RawType::STRING) && !key.is_unqualified() {
                    // Consumes a qualifier without checking membership.
                    return resolver.codec_for(&key.without(REVERSED)?).map(Some);
                }
                Ok(None)
            }))
            .build();

        let err = engine
            .codec_for(&TypeKey::of(RawType::STRING).qualified(LOWERCASE))
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvariantViolation(QualifierError::Missing { qualifier: REVERSED, .. })
        ));
    }

    #[test]
    fn next_codec_skips_past_the_asking_factory() {
        let engine = CodecEngine::builder()
            .add(factory::from_fn(|key, resolver| {
                let _ = (key, resolver);
                Ok(None)
            }))
            .build();
        let first = engine.factories().next().unwrap();
        let result = Resolver::new(&engine)
            .next_codec_for(first, &TypeKey::of(RawType::STRING))
            .map(|_| ());
        assert_eq!(result, Ok(()));

        let stranger = factory::ExactFactory::new(TypeKey::of(RawType::STRING), Arc::new(Constant("x")));
        let err = Resolver::new(&engine)
            .next_codec_for(&stranger, &TypeKey::of(RawType::STRING))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownFactory { .. }));
    }

    // -------------------------------------------------------------------------
    // Concurrency

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodecEngine>();
        assert_send_sync::<CodecRef>();
    }

    #[test]
    fn concurrent_resolution_agrees_on_one_codec() {
        let engine = Arc::new(scenario_engine());
        let key = TypeKey::of(FOO);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let key = key.clone();
                thread::spawn(move || {
                    let codec = engine.codec_for(&key).unwrap();
                    let json = codec.to_json(&record(&["A", "B"])).unwrap();
                    (codec, json)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let cached = engine.codec_for(&key).unwrap();
        for (codec, json) in results {
            assert!(Arc::ptr_eq(&codec, &cached));
            assert_eq!(json, r#"{"list":["b","a"]}"#);
        }
    }
}
