//! The recursive encode/decode engine.
//!
//! A [`Codec`] is a stateless encode/decode pair for one [`TypeKey`],
//! realized twice over the same algorithm: a length-prefixed binary
//! envelope and a JSON text envelope. The free functions here are the
//! top-level entry points; they resolve the codec for a key through the
//! registry and run it.

pub mod container;
pub mod record;
pub mod scalar;
pub mod wire;

use serde_json::Value as JsonValue;

use crate::derive_traits::{FromValue, ToValue, VersionedRecord};
use crate::error::{DecodeError, EncodeError};
use crate::registry::Registry;
use crate::types::TypeKey;
use crate::value::Value;

pub use container::{MapCodec, SeqCodec};
pub use record::RecordCodec;

/// A stateless, reentrant encode/decode pair for one [`TypeKey`].
///
/// Codecs own no data and keep no cross-call state; recursion into element
/// or nested-record codecs goes through the registry passed to every call.
pub trait Codec: Send + Sync {
    /// Encode a value to its binary form.
    fn encode(&self, registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError>;

    /// Decode a value from its binary form. The slice is exactly one
    /// framed payload, as produced by [`Codec::encode`].
    fn decode(&self, registry: &Registry, data: &[u8]) -> Result<Value, DecodeError>;

    /// Encode a value to its text node form.
    fn encode_text(&self, registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError>;

    /// Decode a value from its text node form.
    fn decode_text(&self, registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError>;

    /// String form of a value, used for text map keys.
    fn encode_text_key(&self, registry: &Registry, value: &Value) -> Result<String, EncodeError> {
        match self.encode_text(registry, value)? {
            JsonValue::String(s) => Ok(s),
            node => Ok(node.to_string()),
        }
    }

    /// Inverse of [`Codec::encode_text_key`].
    fn decode_text_key(&self, registry: &Registry, key: &str) -> Result<Value, DecodeError> {
        let node = serde_json::from_str(key)
            .unwrap_or_else(|_| JsonValue::String(key.to_owned()));
        self.decode_text(registry, &node)
    }
}

pub(crate) fn node_kind(node: &JsonValue) -> &'static str {
    match node {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Encode a value of the given type to the binary envelope.
pub fn encode(registry: &Registry, key: &TypeKey, value: &Value) -> Result<Vec<u8>, EncodeError> {
    registry
        .codec_for(key)
        .ok_or_else(|| EncodeError::UnsupportedType(key.to_string()))?
        .encode(registry, value)
}

/// Decode a value of the given type from the binary envelope.
pub fn decode(registry: &Registry, key: &TypeKey, data: &[u8]) -> Result<Value, DecodeError> {
    registry
        .codec_for(key)
        .ok_or_else(|| DecodeError::UnsupportedType(key.to_string()))?
        .decode(registry, data)
}

/// Encode a value of the given type to the text envelope.
pub fn encode_text(
    registry: &Registry,
    key: &TypeKey,
    value: &Value,
) -> Result<JsonValue, EncodeError> {
    registry
        .codec_for(key)
        .ok_or_else(|| EncodeError::UnsupportedType(key.to_string()))?
        .encode_text(registry, value)
}

/// Decode a value of the given type from the text envelope.
pub fn decode_text(
    registry: &Registry,
    key: &TypeKey,
    node: &JsonValue,
) -> Result<Value, DecodeError> {
    registry
        .codec_for(key)
        .ok_or_else(|| DecodeError::UnsupportedType(key.to_string()))?
        .decode_text(registry, node)
}

/// Parse a JSON document and decode a value of the given type from it.
pub fn decode_text_str(
    registry: &Registry,
    key: &TypeKey,
    text: &str,
) -> Result<Value, DecodeError> {
    let node: JsonValue = serde_json::from_str(text)?;
    decode_text(registry, key, &node)
}

fn record_codec<T: VersionedRecord>(
    registry: &Registry,
) -> Option<std::sync::Arc<dyn Codec>> {
    registry.codec_for(&TypeKey::record(T::NAME))
}

/// Encode a typed record to the binary envelope.
///
/// The record type must have been registered with
/// [`Registry::register_record`] first.
pub fn encode_record<T>(registry: &Registry, record: &T) -> Result<Vec<u8>, EncodeError>
where
    T: VersionedRecord + ToValue,
{
    record_codec::<T>(registry)
        .ok_or_else(|| EncodeError::UnsupportedType(T::NAME.to_string()))?
        .encode(registry, &record.to_value())
}

/// Decode a typed record from the binary envelope.
///
/// Fields outside the envelope's version range come back default-constructed.
pub fn decode_record<T>(registry: &Registry, data: &[u8]) -> Result<T, DecodeError>
where
    T: VersionedRecord + FromValue,
{
    let value = record_codec::<T>(registry)
        .ok_or_else(|| DecodeError::UnsupportedType(T::NAME.to_string()))?
        .decode(registry, data)?;
    T::from_value(value)
}

/// Encode a typed record to the text envelope.
pub fn encode_record_text<T>(registry: &Registry, record: &T) -> Result<JsonValue, EncodeError>
where
    T: VersionedRecord + ToValue,
{
    record_codec::<T>(registry)
        .ok_or_else(|| EncodeError::UnsupportedType(T::NAME.to_string()))?
        .encode_text(registry, &record.to_value())
}

/// Decode a typed record from the text envelope.
pub fn decode_record_text<T>(registry: &Registry, node: &JsonValue) -> Result<T, DecodeError>
where
    T: VersionedRecord + FromValue,
{
    let value = record_codec::<T>(registry)
        .ok_or_else(|| DecodeError::UnsupportedType(T::NAME.to_string()))?
        .decode_text(registry, node)?;
    T::from_value(value)
}
