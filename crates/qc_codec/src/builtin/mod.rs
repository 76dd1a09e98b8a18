//! Factories every engine ends with.
//!
//! They are asked after all user factories, in this order: scalars, lists,
//! maps, options, then records from registered struct metadata. None of them
//! matches a qualified key: qualifiers are served by user factories, which
//! usually consume them and delegate the remainder back to these.

// -----------------------------------------------------------------------------
// Modules

mod list;
mod map;
mod option;
mod record;
mod scalar;

// -----------------------------------------------------------------------------
// Factories

use std::sync::Arc;

use crate::factory::CodecFactory;

/// Returns new instances of the built-in factories, in the order they are
/// asked.
pub fn factories() -> Vec<Arc<dyn CodecFactory>> {
    vec![
        Arc::new(scalar::ScalarFactory),
        Arc::new(list::ListFactory),
        Arc::new(map::MapFactory),
        Arc::new(option::OptionFactory),
        Arc::new(record::StructFactory),
    ]
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use qc_stream::{JsonWriter, StreamError};

    use crate::Value;
    use crate::codec::{CodecExt, DecodeError, EncodeError};
    use crate::engine::{CodecEngine, ResolveError};
    use crate::key::{RawType, TypeKey};
    use crate::meta::{Described, StructInfo};

    const USER: RawType = RawType::new("qc_codec::tests::User");

    fn user_engine() -> CodecEngine {
        CodecEngine::builder()
            .add_struct(
                StructInfo::new(USER)
                    .with_field("name", TypeKey::of(RawType::STRING))
                    .with_field("tags", <Vec<String>>::type_key())
                    .with_field("age", <Option<u32>>::type_key()),
            )
            .build()
    }

    fn object(members: &[(&str, Value)]) -> Value {
        Value::Object(
            members
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn factory_order_is_fixed() {
        let engine = CodecEngine::default();
        let names: Vec<_> = engine.factories().map(|factory| factory.name()).collect();
        assert_eq!(names, ["scalar", "list", "map", "option", "struct"]);
    }

    #[test]
    fn nested_lists_decode_and_encode() {
        let engine = CodecEngine::default();
        let codec = engine.codec::<Vec<Vec<i64>>>().unwrap();
        let value = codec.from_json("[[1,2],[],[3]]").unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::List(vec![Value::Int(1), Value::Int(2)]),
                Value::List(vec![]),
                Value::List(vec![Value::Int(3)]),
            ])
        );
        assert_eq!(codec.to_json(&value).unwrap(), "[[1,2],[],[3]]");
    }

    #[test]
    fn list_element_errors_carry_the_path() {
        let engine = CodecEngine::default();
        let codec = engine.codec::<Vec<bool>>().unwrap();
        let err = codec.from_json("[true, 1]").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Stream(StreamError::UnexpectedToken { ref path, .. }) if path == "$[1]"
        ));
    }

    #[test]
    fn maps_keep_member_order() {
        let engine = CodecEngine::default();
        let codec = engine
            .codec::<std::collections::BTreeMap<String, f64>>()
            .unwrap();
        let value = codec.from_json(r#"{"z":1.5,"a":2.5}"#).unwrap();
        assert_eq!(codec.to_json(&value).unwrap(), r#"{"z":1.5,"a":2.5}"#);
    }

    #[test]
    fn map_null_members_follow_serialize_nulls() {
        let engine = CodecEngine::default();
        let codec = engine
            .codec::<std::collections::BTreeMap<String, Option<String>>>()
            .unwrap();
        let value = codec.from_json(r#"{"a":null,"b":"x"}"#).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Null));
        assert_eq!(codec.to_json(&value).unwrap(), r#"{"b":"x"}"#);

        let mut writer = JsonWriter::new().with_serialize_nulls(true);
        codec.encode(&mut writer, &value).unwrap();
        assert_eq!(writer.finish().unwrap(), r#"{"a":null,"b":"x"}"#);
    }

    #[test]
    fn map_keys_must_be_plain_strings() {
        let engine = CodecEngine::default();
        let key = TypeKey::generic(RawType::MAP, [TypeKey::of(RawType::I32), TypeKey::of(RawType::I32)]);
        assert!(matches!(
            engine.codec_for(&key),
            Err(ResolveError::InvalidKey { .. })
        ));
        assert!(!engine.is_cached(&key));
    }

    #[test]
    fn list_arity_is_checked() {
        let engine = CodecEngine::default();
        let key = TypeKey::of(RawType::LIST);
        assert!(matches!(
            engine.codec_for(&key),
            Err(ResolveError::InvalidKey { .. })
        ));
    }

    #[test]
    fn options_accept_null() {
        let engine = CodecEngine::default();
        let codec = engine.codec::<Vec<Option<String>>>().unwrap();
        let value = codec.from_json(r#"["a",null]"#).unwrap();
        assert_eq!(value, Value::List(vec![Value::from("a"), Value::Null]));
        assert_eq!(codec.to_json(&value).unwrap(), r#"["a",null]"#);
    }

    #[test]
    fn records_decode_in_declaration_order() {
        let engine = user_engine();
        let codec = engine.codec_for(&TypeKey::of(USER)).unwrap();
        let value = codec
            .from_json(r#"{"extra":{"x":[1]},"tags":["t"],"name":"n"}"#)
            .unwrap();
        assert_eq!(
            value,
            object(&[
                ("name", Value::from("n")),
                ("tags", Value::List(vec![Value::from("t")])),
                ("age", Value::Null),
            ])
        );
    }

    #[test]
    fn records_drop_null_members_unless_asked() {
        let engine = user_engine();
        let codec = engine.codec_for(&TypeKey::of(USER)).unwrap();
        let value = object(&[("name", Value::from("n")), ("tags", Value::List(vec![]))]);
        assert_eq!(codec.to_json(&value).unwrap(), r#"{"name":"n","tags":[]}"#);

        let mut writer = JsonWriter::new().with_serialize_nulls(true);
        codec.encode(&mut writer, &value).unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            r#"{"name":"n","tags":[],"age":null}"#
        );
    }

    #[test]
    fn records_report_missing_and_unknown_fields() {
        let engine = user_engine();
        let codec = engine.codec_for(&TypeKey::of(USER)).unwrap();

        assert_eq!(
            codec.from_json(r#"{"name":"n"}"#),
            Err(DecodeError::MissingField {
                field: "tags".to_owned(),
                path: "$".to_owned(),
            })
        );

        let missing = object(&[("name", Value::from("n"))]);
        assert!(matches!(
            codec.to_json(&missing),
            Err(EncodeError::MissingField { .. })
        ));

        let unknown = object(&[
            ("name", Value::from("n")),
            ("tags", Value::List(vec![])),
            ("nick", Value::from("x")),
        ]);
        assert!(matches!(
            codec.to_json(&unknown),
            Err(EncodeError::Invalid { .. })
        ));
    }

    #[test]
    fn unregistered_struct_has_no_codec() {
        let engine = CodecEngine::default();
        assert!(matches!(
            engine.codec_for(&TypeKey::of(USER)),
            Err(ResolveError::NoFactoryMatch { .. })
        ));
        assert_eq!(engine.cached_len(), 0);
    }

    #[test]
    fn self_referential_struct_is_a_cycle() {
        const NODE: RawType = RawType::new("qc_codec::tests::Node");
        let engine = CodecEngine::builder()
            .add_struct(StructInfo::new(NODE).with_field(
                "next",
                TypeKey::generic(RawType::OPTION, [TypeKey::of(NODE)]),
            ))
            .build();
        assert!(matches!(
            engine.codec_for(&TypeKey::of(NODE)),
            Err(ResolveError::CyclicResolution { .. })
        ));
    }
}
