//! Generic container codecs for sequences and maps.
//!
//! Both carry their own element count, independent of the enclosing
//! record's framing, and resolve their element codecs through the
//! registry on every call.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::wire::{put_i32, put_segment, Reader};
use super::{node_kind, Codec};
use crate::error::{DecodeError, EncodeError};
use crate::registry::Registry;
use crate::types::TypeKey;
use crate::value::Value;

/// Insert with last-write-wins on duplicate keys.
fn insert_entry(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
}

/// Codec for an ordered sequence of one element type.
///
/// Binary: `count:i32` then one length-prefixed segment per element, in
/// order. Text: a JSON array of element nodes. Element order is preserved
/// exactly.
pub struct SeqCodec {
    elem: TypeKey,
}

impl SeqCodec {
    pub fn new(elem: TypeKey) -> Self {
        SeqCodec { elem }
    }

    fn elem_codec_encode(&self, registry: &Registry) -> Result<Arc<dyn Codec>, EncodeError> {
        registry
            .codec_for(&self.elem)
            .ok_or_else(|| EncodeError::UnsupportedType(self.elem.to_string()))
    }

    fn elem_codec_decode(&self, registry: &Registry) -> Result<Arc<dyn Codec>, DecodeError> {
        registry
            .codec_for(&self.elem)
            .ok_or_else(|| DecodeError::UnsupportedType(self.elem.to_string()))
    }
}

impl Codec for SeqCodec {
    fn encode(&self, registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let items = match value {
            Value::Seq(items) => items,
            other => {
                return Err(EncodeError::TypeMismatch {
                    expected: "seq".to_string(),
                    actual: other.type_name().to_string(),
                });
            }
        };

        let codec = self.elem_codec_encode(registry)?;
        let mut out = Vec::new();
        put_i32(&mut out, items.len() as i32);
        for item in items {
            put_segment(&mut out, &codec.encode(registry, item)?);
        }
        Ok(out)
    }

    fn decode(&self, registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let codec = self.elem_codec_decode(registry)?;
        let mut reader = Reader::new(data);

        let count = reader.read_i32()?;
        if count < 0 {
            return Err(DecodeError::SchemaMismatch(format!(
                "negative sequence count {}",
                count
            )));
        }

        let mut items = Vec::new();
        for _ in 0..count {
            items.push(codec.decode(registry, reader.read_segment()?)?);
        }
        if !reader.is_empty() {
            return Err(DecodeError::SchemaMismatch(format!(
                "{} trailing bytes after {} sequence elements",
                reader.remaining(),
                count
            )));
        }
        Ok(Value::Seq(items))
    }

    fn encode_text(&self, registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        let items = match value {
            Value::Seq(items) => items,
            other => {
                return Err(EncodeError::TypeMismatch {
                    expected: "seq".to_string(),
                    actual: other.type_name().to_string(),
                });
            }
        };

        let codec = self.elem_codec_encode(registry)?;
        let mut nodes = Vec::with_capacity(items.len());
        for item in items {
            nodes.push(codec.encode_text(registry, item)?);
        }
        Ok(JsonValue::Array(nodes))
    }

    fn decode_text(&self, registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        let nodes = node
            .as_array()
            .ok_or_else(|| {
                DecodeError::SchemaMismatch(format!(
                    "expected array, got {} node",
                    node_kind(node)
                ))
            })?;

        let codec = self.elem_codec_decode(registry)?;
        let mut items = Vec::with_capacity(nodes.len());
        for node in nodes {
            items.push(codec.decode_text(registry, node)?);
        }
        Ok(Value::Seq(items))
    }
}

/// Codec for an associative map of one key type to one value type.
///
/// Binary: `count:i32` then alternating length-prefixed key and value
/// segments, adjacent and consistently paired. Text: a JSON object keyed
/// by the key codec's string form. Iteration order carries no meaning;
/// decode inserts last-write-wins on duplicate keys.
pub struct MapCodec {
    key: TypeKey,
    value: TypeKey,
}

impl MapCodec {
    pub fn new(key: TypeKey, value: TypeKey) -> Self {
        MapCodec { key, value }
    }

    fn codecs_encode(
        &self,
        registry: &Registry,
    ) -> Result<(Arc<dyn Codec>, Arc<dyn Codec>), EncodeError> {
        let key = registry
            .codec_for(&self.key)
            .ok_or_else(|| EncodeError::UnsupportedType(self.key.to_string()))?;
        let value = registry
            .codec_for(&self.value)
            .ok_or_else(|| EncodeError::UnsupportedType(self.value.to_string()))?;
        Ok((key, value))
    }

    fn codecs_decode(
        &self,
        registry: &Registry,
    ) -> Result<(Arc<dyn Codec>, Arc<dyn Codec>), DecodeError> {
        let key = registry
            .codec_for(&self.key)
            .ok_or_else(|| DecodeError::UnsupportedType(self.key.to_string()))?;
        let value = registry
            .codec_for(&self.value)
            .ok_or_else(|| DecodeError::UnsupportedType(self.value.to_string()))?;
        Ok((key, value))
    }
}

impl Codec for MapCodec {
    fn encode(&self, registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let entries = match value {
            Value::Map(entries) => entries,
            other => {
                return Err(EncodeError::TypeMismatch {
                    expected: "map".to_string(),
                    actual: other.type_name().to_string(),
                });
            }
        };

        let (key_codec, value_codec) = self.codecs_encode(registry)?;
        let mut out = Vec::new();
        put_i32(&mut out, entries.len() as i32);
        for (k, v) in entries {
            put_segment(&mut out, &key_codec.encode(registry, k)?);
            put_segment(&mut out, &value_codec.encode(registry, v)?);
        }
        Ok(out)
    }

    fn decode(&self, registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let (key_codec, value_codec) = self.codecs_decode(registry)?;
        let mut reader = Reader::new(data);

        let count = reader.read_i32()?;
        if count < 0 {
            return Err(DecodeError::SchemaMismatch(format!(
                "negative map entry count {}",
                count
            )));
        }

        let mut entries = Vec::new();
        for _ in 0..count {
            let key = key_codec.decode(registry, reader.read_segment()?)?;
            let value = value_codec.decode(registry, reader.read_segment()?)?;
            insert_entry(&mut entries, key, value);
        }
        if !reader.is_empty() {
            return Err(DecodeError::SchemaMismatch(format!(
                "{} trailing bytes after {} map entries",
                reader.remaining(),
                count
            )));
        }
        Ok(Value::Map(entries))
    }

    fn encode_text(&self, registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        let entries = match value {
            Value::Map(entries) => entries,
            other => {
                return Err(EncodeError::TypeMismatch {
                    expected: "map".to_string(),
                    actual: other.type_name().to_string(),
                });
            }
        };

        let (key_codec, value_codec) = self.codecs_encode(registry)?;
        let mut obj = serde_json::Map::new();
        for (k, v) in entries {
            obj.insert(
                key_codec.encode_text_key(registry, k)?,
                value_codec.encode_text(registry, v)?,
            );
        }
        Ok(JsonValue::Object(obj))
    }

    fn decode_text(&self, registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        let obj = node
            .as_object()
            .ok_or_else(|| {
                DecodeError::SchemaMismatch(format!(
                    "expected object, got {} node",
                    node_kind(node)
                ))
            })?;

        let (key_codec, value_codec) = self.codecs_decode(registry)?;
        let mut entries = Vec::new();
        for (k, v) in obj {
            let key = key_codec.decode_text_key(registry, k)?;
            let value = value_codec.decode_text(registry, v)?;
            insert_entry(&mut entries, key, value);
        }
        Ok(Value::Map(entries))
    }
}
