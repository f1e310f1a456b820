//! The versioned record codec.
//!
//! Orchestrates everything else: reads or writes the schema version,
//! walks the record's fields in schema order, consults each field's
//! version range, and dispatches to the matching scalar, container, or
//! nested-record codec through the registry. Binary envelopes are
//! positional (one length-prefixed segment per in-range field); text
//! envelopes are named (`{"version": v, <field>: <node>, ...}`).

use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::wire::{put_i32, put_segment, Reader};
use super::{node_kind, Codec};
use crate::error::{DecodeError, EncodeError};
use crate::registry::Registry;
use crate::types::{FieldDescriptor, RecordSchema};
use crate::value::{Record, Value};

/// Codec for one record type, built from its schema.
///
/// The schema is built once per type at registration and shared for the
/// registry's lifetime; the codec itself is stateless.
pub struct RecordCodec {
    schema: Arc<RecordSchema>,
}

impl RecordCodec {
    pub fn new(schema: RecordSchema) -> Self {
        RecordCodec {
            schema: Arc::new(schema),
        }
    }

    /// The schema this codec encodes and decodes against.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    fn record_value<'a>(&self, value: &'a Value) -> Result<&'a Record, EncodeError> {
        value.as_record().ok_or_else(|| EncodeError::TypeMismatch {
            expected: "record".to_string(),
            actual: value.type_name().to_string(),
        })
    }

    /// Version under which a record value is encoded. A schema without a
    /// version field always encodes as version 0.
    fn version_of(&self, record: &Record) -> i32 {
        if self.schema.has_version {
            record.version()
        } else {
            0
        }
    }

    fn field_value<'a>(
        &self,
        record: &'a Record,
        field: &FieldDescriptor,
    ) -> Result<&'a Value, EncodeError> {
        record.get(&field.name).ok_or_else(|| EncodeError::MissingField {
            type_name: self.schema.name.clone(),
            field: field.name.clone(),
        })
    }

    /// Fields selected by a decoded envelope version. A version that
    /// selects nothing cannot have produced a valid encoding.
    fn decode_fields(&self, version: i32) -> Result<Vec<&FieldDescriptor>, DecodeError> {
        if version < 0 {
            return Err(DecodeError::SchemaMismatch(format!(
                "negative version {} for '{}'",
                version, self.schema.name
            )));
        }
        let fields: Vec<&FieldDescriptor> = self.schema.in_range(version).collect();
        if fields.is_empty() {
            return Err(DecodeError::SchemaMismatch(format!(
                "version {} selects no fields of '{}'",
                version, self.schema.name
            )));
        }
        Ok(fields)
    }

    fn encode_codec(
        &self,
        registry: &Registry,
        field: &FieldDescriptor,
    ) -> Result<Arc<dyn Codec>, EncodeError> {
        registry
            .codec_for(&field.key)
            .ok_or_else(|| EncodeError::UnsupportedType(field.key.to_string()))
    }

    fn decode_codec(
        &self,
        registry: &Registry,
        field: &FieldDescriptor,
    ) -> Result<Arc<dyn Codec>, DecodeError> {
        registry
            .codec_for(&field.key)
            .ok_or_else(|| DecodeError::UnsupportedType(field.key.to_string()))
    }
}

impl Codec for RecordCodec {
    fn encode(&self, registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let record = self.record_value(value)?;
        let version = self.version_of(record);

        let mut segments = Vec::new();
        for field in self.schema.in_range(version) {
            let value = self.field_value(record, field)?;
            let codec = self.encode_codec(registry, field)?;
            segments.push(codec.encode(registry, value)?);
        }

        if segments.is_empty() {
            return Err(EncodeError::EmptyPayload {
                type_name: self.schema.name.clone(),
                version,
            });
        }

        let total: usize = segments.iter().map(|s| 4 + s.len()).sum();
        let mut out = Vec::with_capacity(4 + total);
        put_i32(&mut out, version);
        for segment in &segments {
            put_segment(&mut out, segment);
        }
        Ok(out)
    }

    fn decode(&self, registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let mut reader = Reader::new(data);
        let version = reader.read_i32()?;
        let fields = self.decode_fields(version)?;

        let mut segments = Vec::new();
        while !reader.is_empty() {
            segments.push(reader.read_segment()?);
        }
        if segments.len() != fields.len() {
            return Err(DecodeError::SchemaMismatch(format!(
                "'{}' at version {}: expected {} field segments, found {}",
                self.schema.name,
                version,
                fields.len(),
                segments.len()
            )));
        }

        let mut record = Record::with_version(version);
        for (field, segment) in fields.into_iter().zip(segments) {
            let codec = self.decode_codec(registry, field)?;
            record.set(field.name.as_str(), codec.decode(registry, segment)?);
        }
        Ok(Value::Record(record))
    }

    fn encode_text(&self, registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        let record = self.record_value(value)?;
        let version = self.version_of(record);

        let mut obj = serde_json::Map::new();
        obj.insert("version".to_string(), JsonValue::from(version));

        let mut included = 0usize;
        for field in self.schema.in_range(version) {
            let value = self.field_value(record, field)?;
            let codec = self.encode_codec(registry, field)?;
            obj.insert(field.name.clone(), codec.encode_text(registry, value)?);
            included += 1;
        }

        if included == 0 {
            return Err(EncodeError::EmptyPayload {
                type_name: self.schema.name.clone(),
                version,
            });
        }
        Ok(JsonValue::Object(obj))
    }

    fn decode_text(&self, registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        let obj = node.as_object().ok_or_else(|| {
            DecodeError::SchemaMismatch(format!(
                "expected object for '{}', got {} node",
                self.schema.name,
                node_kind(node)
            ))
        })?;

        let version = obj
            .get("version")
            .and_then(JsonValue::as_i64)
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| {
                DecodeError::SchemaMismatch(format!(
                    "missing or invalid \"version\" entry for '{}'",
                    self.schema.name
                ))
            })?;
        let fields = self.decode_fields(version)?;

        let mut record = Record::with_version(version);
        for field in fields {
            let entry = obj.get(&field.name).ok_or_else(|| {
                DecodeError::SchemaMismatch(format!(
                    "missing entry '{}' for '{}' at version {}",
                    field.name, self.schema.name, version
                ))
            })?;
            let codec = self.decode_codec(registry, field)?;
            record.set(field.name.as_str(), codec.decode_text(registry, entry)?);
        }
        Ok(Value::Record(record))
    }
}
