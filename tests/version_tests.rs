//! Tests for version-range gating and envelope shape.
//!
//! A field declared with range [from, until] is serialized exactly when
//! from <= version <= until; an encoding that would include zero fields
//! is an error, never an empty envelope.

use pretty_assertions::assert_eq;
use verso::codec;
use verso::{EncodeError, DecodeError, Record, RecordSchema, Registry, TypeKey, Value};

/// Schema with one gated field and one always-on field, like a record
/// that grew a nickname in version 1 and dropped it after version 4.
fn account_registry() -> Registry {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Account")
            .version_field()
            .ranged_field("nickname", TypeKey::Str, 1, 4)
            .field("age", TypeKey::Int)
            .build(),
    );
    registry
}

fn account(version: i32) -> Value {
    Value::Record(
        Record::with_version(version)
            .field("nickname", "Bye world!")
            .field("age", 90i32),
    )
}

#[test]
fn test_gated_field_included_inside_range() {
    let registry = account_registry();
    let key = TypeKey::record("Account");

    for version in 1..=4 {
        let encoded = codec::encode(&registry, &key, &account(version)).unwrap();
        let decoded = codec::decode(&registry, &key, &encoded).unwrap();
        let record = decoded.as_record().unwrap();
        assert_eq!(record.version(), version);
        assert_eq!(record.get("nickname"), Some(&Value::Str("Bye world!".into())));
        assert_eq!(record.get("age"), Some(&Value::Int(90)));
    }
}

#[test]
fn test_gated_field_omitted_outside_range() {
    let registry = account_registry();
    let key = TypeKey::record("Account");

    for version in [0, 5, 100] {
        let encoded = codec::encode(&registry, &key, &account(version)).unwrap();
        let decoded = codec::decode(&registry, &key, &encoded).unwrap();
        let record = decoded.as_record().unwrap();
        assert_eq!(record.get("nickname"), None);
        assert_eq!(record.get("age"), Some(&Value::Int(90)));
    }
}

#[test]
fn test_text_gating_matches_binary() {
    let registry = account_registry();
    let key = TypeKey::record("Account");

    let node = codec::encode_text(&registry, &key, &account(2)).unwrap();
    assert!(node.as_object().unwrap().contains_key("nickname"));

    let node = codec::encode_text(&registry, &key, &account(5)).unwrap();
    assert!(!node.as_object().unwrap().contains_key("nickname"));

    let decoded = codec::decode_text(&registry, &key, &node).unwrap();
    assert_eq!(decoded.as_record().unwrap().get("nickname"), None);
}

#[test]
fn test_all_fields_gated_out_is_empty_payload() {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Ghost")
            .version_field()
            .ranged_field("nickname", TypeKey::Str, 1, 4)
            .build(),
    );
    let key = TypeKey::record("Ghost");
    let value = Value::Record(Record::with_version(0).field("nickname", "gone"));

    assert!(matches!(
        codec::encode(&registry, &key, &value),
        Err(EncodeError::EmptyPayload { .. })
    ));
    assert!(matches!(
        codec::encode_text(&registry, &key, &value),
        Err(EncodeError::EmptyPayload { .. })
    ));
}

#[test]
fn test_single_field_record_uses_uniform_envelope() {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Tag")
            .field("name", TypeKey::Str)
            .build(),
    );
    let key = TypeKey::record("Tag");
    let value = Value::Record(Record::new().field("name", "hi"));

    // version + length-prefixed segment, same as any multi-field record
    let encoded = codec::encode(&registry, &key, &value).unwrap();
    assert_eq!(encoded, vec![0, 0, 0, 0, 0, 0, 0, 2, b'h', b'i']);
}

#[test]
fn test_schema_without_version_field_encodes_version_zero() {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Plain")
            .field("name", TypeKey::Str)
            .build(),
    );
    let key = TypeKey::record("Plain");

    // The record claims version 7 but the schema has no version field.
    let value = Value::Record(Record::with_version(7).field("name", "x"));
    let encoded = codec::encode(&registry, &key, &value).unwrap();
    assert_eq!(&encoded[..4], &[0, 0, 0, 0]);

    let decoded = codec::decode(&registry, &key, &encoded).unwrap();
    assert_eq!(decoded.as_record().unwrap().version(), 0);
}

#[test]
fn test_decode_version_selecting_no_fields_fails() {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Ghost")
            .version_field()
            .ranged_field("nickname", TypeKey::Str, 1, 4)
            .build(),
    );
    let key = TypeKey::record("Ghost");
    let value = Value::Record(Record::with_version(1).field("nickname", "gone"));
    let mut encoded = codec::encode(&registry, &key, &value).unwrap();

    // Rewrite the envelope version to 0, which selects nothing.
    encoded[..4].copy_from_slice(&[0, 0, 0, 0]);
    assert!(matches!(
        codec::decode(&registry, &key, &encoded),
        Err(DecodeError::SchemaMismatch(_))
    ));
}

#[test]
fn test_decode_negative_version_fails() {
    let registry = account_registry();
    let key = TypeKey::record("Account");
    let mut encoded = codec::encode(&registry, &key, &account(2)).unwrap();

    encoded[..4].copy_from_slice(&(-1i32).to_be_bytes());
    assert!(matches!(
        codec::decode(&registry, &key, &encoded),
        Err(DecodeError::SchemaMismatch(_))
    ));
}
