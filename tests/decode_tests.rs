//! Tests for malformed-envelope rejection and the registry contract.
//!
//! Decode never produces a silently wrong value: short buffers, bad
//! lengths, wrong segment counts and shape disagreements all fail fast
//! with the matching error.

use std::sync::Arc;

use verso::codec;
use verso::{
    Codec, DecodeError, EncodeError, Record, RecordSchema, Registry, TypeKey, Value,
};

fn pair_registry() -> Registry {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Pair")
            .field("name", TypeKey::Str)
            .field("age", TypeKey::Int)
            .build(),
    );
    registry
}

fn pair_value() -> Value {
    Value::Record(Record::new().field("name", "Alice").field("age", 30i32))
}

// =============================================================================
// Binary rejection
// =============================================================================

#[test]
fn test_truncated_buffer_fails() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let encoded = codec::encode(&registry, &key, &pair_value()).unwrap();

    // Cutting anywhere inside the envelope must surface as Truncated.
    let cut = &encoded[..encoded.len() - 2];
    assert!(matches!(
        codec::decode(&registry, &key, cut),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn test_declared_length_beyond_buffer_fails() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");

    // version 0, then a segment claiming 10 bytes with only 3 present
    let mut data = vec![0, 0, 0, 0];
    data.extend_from_slice(&10i32.to_be_bytes());
    data.extend_from_slice(b"abc");

    assert!(matches!(
        codec::decode(&registry, &key, &data),
        Err(DecodeError::Truncated { need: 10, have: 3 })
    ));
}

#[test]
fn test_wrong_scalar_width_fails() {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Solo")
            .field("age", TypeKey::Int)
            .build(),
    );
    let key = TypeKey::record("Solo");

    // version 0, one segment of 2 bytes where the int codec needs 4
    let mut data = vec![0, 0, 0, 0];
    data.extend_from_slice(&2i32.to_be_bytes());
    data.extend_from_slice(&[0, 1]);

    assert!(matches!(
        codec::decode(&registry, &key, &data),
        Err(DecodeError::Truncated { need: 4, have: 2 })
    ));
}

#[test]
fn test_top_level_scalar_wrong_width_fails() {
    let registry = Registry::new();
    assert!(matches!(
        codec::decode(&registry, &TypeKey::Long, &[0u8; 4]),
        Err(DecodeError::Truncated { need: 8, have: 4 })
    ));
}

#[test]
fn test_invalid_utf8_fails() {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Solo")
            .field("name", TypeKey::Str)
            .build(),
    );
    let key = TypeKey::record("Solo");

    let mut data = vec![0, 0, 0, 0];
    data.extend_from_slice(&2i32.to_be_bytes());
    data.extend_from_slice(&[0xFF, 0xFE]);

    assert!(matches!(
        codec::decode(&registry, &key, &data),
        Err(DecodeError::InvalidUtf8(_))
    ));
}

#[test]
fn test_segment_count_mismatch_fails() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let mut encoded = codec::encode(&registry, &key, &pair_value()).unwrap();

    // A third segment the schema does not expect.
    encoded.extend_from_slice(&1i32.to_be_bytes());
    encoded.push(0);

    assert!(matches!(
        codec::decode(&registry, &key, &encoded),
        Err(DecodeError::SchemaMismatch(_))
    ));
}

#[test]
fn test_negative_sequence_count_fails() {
    let registry = Registry::new();
    let key = TypeKey::seq(TypeKey::Int);
    let data = (-1i32).to_be_bytes();

    assert!(matches!(
        codec::decode(&registry, &key, &data),
        Err(DecodeError::SchemaMismatch(_))
    ));
}

#[test]
fn test_trailing_bytes_after_sequence_fail() {
    let registry = Registry::new();
    let key = TypeKey::seq(TypeKey::Int);
    let value = Value::Seq(vec![Value::Int(1)]);

    let mut encoded = codec::encode(&registry, &key, &value).unwrap();
    encoded.push(0xAB);

    assert!(matches!(
        codec::decode(&registry, &key, &encoded),
        Err(DecodeError::SchemaMismatch(_))
    ));
}

#[test]
fn test_wrong_value_shape_fails_encode() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let value = Value::Record(Record::new().field("name", "Alice").field("age", "thirty"));

    assert!(matches!(
        codec::encode(&registry, &key, &value),
        Err(EncodeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_missing_field_value_fails_encode() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let value = Value::Record(Record::new().field("name", "Alice"));

    assert!(matches!(
        codec::encode(&registry, &key, &value),
        Err(EncodeError::MissingField { .. })
    ));
}

// =============================================================================
// Text rejection
// =============================================================================

#[test]
fn test_unparseable_document_fails() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");

    assert!(matches!(
        codec::decode_text_str(&registry, &key, "{not json"),
        Err(DecodeError::InvalidText(_))
    ));
}

#[test]
fn test_missing_version_entry_fails() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let node = serde_json::json!({ "name": "Alice", "age": 30 });

    assert!(matches!(
        codec::decode_text(&registry, &key, &node),
        Err(DecodeError::SchemaMismatch(_))
    ));
}

#[test]
fn test_missing_field_entry_fails() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let node = serde_json::json!({ "version": 0, "name": "Alice" });

    assert!(matches!(
        codec::decode_text(&registry, &key, &node),
        Err(DecodeError::SchemaMismatch(_))
    ));
}

#[test]
fn test_unknown_entries_are_ignored() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let node = serde_json::json!({
        "version": 0,
        "name": "Alice",
        "age": 30,
        "extra": "ignored",
    });

    let decoded = codec::decode_text(&registry, &key, &node).unwrap();
    assert_eq!(decoded, pair_value());
}

#[test]
fn test_field_node_shape_mismatch_fails() {
    let registry = pair_registry();
    let key = TypeKey::record("Pair");
    let node = serde_json::json!({ "version": 0, "name": "Alice", "age": "thirty" });

    assert!(matches!(
        codec::decode_text(&registry, &key, &node),
        Err(DecodeError::SchemaMismatch(_))
    ));
}

// =============================================================================
// Registry contract
// =============================================================================

/// Strings framed as raw bytes, but uppercased on encode. Only used to
/// observe which codec a lookup resolves to.
struct ShoutCodec;

impl Codec for ShoutCodec {
    fn encode(&self, _registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        match value {
            Value::Str(s) => Ok(s.to_uppercase().into_bytes()),
            other => Err(EncodeError::TypeMismatch {
                expected: "str".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    fn decode(&self, _registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        Ok(Value::Str(String::from_utf8(data.to_vec())?))
    }

    fn encode_text(
        &self,
        _registry: &Registry,
        value: &Value,
    ) -> Result<serde_json::Value, EncodeError> {
        match value {
            Value::Str(s) => Ok(serde_json::Value::String(s.to_uppercase())),
            other => Err(EncodeError::TypeMismatch {
                expected: "str".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    fn decode_text(
        &self,
        _registry: &Registry,
        node: &serde_json::Value,
    ) -> Result<Value, DecodeError> {
        match node {
            serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
            _ => Err(DecodeError::SchemaMismatch("expected string".to_string())),
        }
    }
}

#[test]
fn test_register_returns_previous_codec() {
    let registry = Registry::new();

    let previous = registry.register(TypeKey::Str, Arc::new(ShoutCodec));
    assert!(previous.is_some());

    let encoded = codec::encode(&registry, &TypeKey::Str, &Value::Str("loud".into())).unwrap();
    assert_eq!(encoded, b"LOUD");
}

#[test]
fn test_remove_then_lookup_fails() {
    let registry = Registry::new();

    assert!(registry.remove(&TypeKey::Int).is_some());
    assert!(registry.retrieve(&TypeKey::Int).is_none());
    assert!(registry.remove(&TypeKey::Int).is_none());

    // A sequence over the removed element type can no longer encode.
    let key = TypeKey::seq(TypeKey::Int);
    assert!(matches!(
        codec::encode(&registry, &key, &Value::Seq(vec![Value::Int(1)])),
        Err(EncodeError::UnsupportedType(_))
    ));
}

#[test]
fn test_unregistered_record_type_fails_both_ways() {
    let registry = Registry::new();
    registry.register_schema(
        RecordSchema::builder("Holder")
            .field("inner", TypeKey::record("Missing"))
            .build(),
    );
    let key = TypeKey::record("Holder");
    let value = Value::Record(Record::new().field("inner", Record::new().field("x", 1i32)));

    assert!(matches!(
        codec::encode(&registry, &key, &value),
        Err(EncodeError::UnsupportedType(_))
    ));

    // version 0 plus one opaque segment; the field's codec is still missing
    let mut data = vec![0, 0, 0, 0];
    data.extend_from_slice(&1i32.to_be_bytes());
    data.push(0);
    assert!(matches!(
        codec::decode(&registry, &key, &data),
        Err(DecodeError::UnsupportedType(_))
    ));
}
