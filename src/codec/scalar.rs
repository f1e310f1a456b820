//! Built-in scalar codecs.
//!
//! Integers are fixed-width big-endian two's-complement, floats are
//! fixed-width IEEE 754, strings are UTF-8 bytes. On the text side,
//! numbers map to JSON numbers and strings pass through; non-finite
//! floats have no JSON number form and fail encode.

use serde_json::Value as JsonValue;

use super::{node_kind, Codec};
use crate::error::{DecodeError, EncodeError};
use crate::registry::Registry;
use crate::value::Value;

fn mismatch(expected: &str, actual: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.type_name().to_string(),
    }
}

fn wrong_node(expected: &str, node: &JsonValue) -> DecodeError {
    DecodeError::SchemaMismatch(format!("expected {}, got {} node", expected, node_kind(node)))
}

/// A fixed-width payload of any other width is the framer handing us a
/// slice that disagrees with the declared type.
fn exact_width(data: &[u8], width: usize) -> Result<&[u8], DecodeError> {
    if data.len() != width {
        return Err(DecodeError::Truncated {
            need: width,
            have: data.len(),
        });
    }
    Ok(data)
}

/// Signed 8-bit integers.
pub struct ByteCodec;

impl Codec for ByteCodec {
    fn encode(&self, _registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        match value {
            Value::Byte(v) => Ok(vec![*v as u8]),
            other => Err(mismatch("byte", other)),
        }
    }

    fn decode(&self, _registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let b = exact_width(data, 1)?;
        Ok(Value::Byte(b[0] as i8))
    }

    fn encode_text(&self, _registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        match value {
            Value::Byte(v) => Ok(JsonValue::from(*v)),
            other => Err(mismatch("byte", other)),
        }
    }

    fn decode_text(&self, _registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        let v = node.as_i64().ok_or_else(|| wrong_node("byte number", node))?;
        i8::try_from(v).map(Value::Byte).map_err(|_| {
            DecodeError::SchemaMismatch(format!("integer {} out of range for byte", v))
        })
    }
}

/// Signed 32-bit integers, 4 bytes big-endian.
pub struct IntCodec;

impl Codec for IntCodec {
    fn encode(&self, _registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        match value {
            Value::Int(v) => Ok(v.to_be_bytes().to_vec()),
            other => Err(mismatch("int", other)),
        }
    }

    fn decode(&self, _registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let b = exact_width(data, 4)?;
        Ok(Value::Int(i32::from_be_bytes([b[0], b[1], b[2], b[3]])))
    }

    fn encode_text(&self, _registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        match value {
            Value::Int(v) => Ok(JsonValue::from(*v)),
            other => Err(mismatch("int", other)),
        }
    }

    fn decode_text(&self, _registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        let v = node.as_i64().ok_or_else(|| wrong_node("int number", node))?;
        i32::try_from(v).map(Value::Int).map_err(|_| {
            DecodeError::SchemaMismatch(format!("integer {} out of range for int", v))
        })
    }
}

/// Signed 64-bit integers, 8 bytes big-endian.
pub struct LongCodec;

impl Codec for LongCodec {
    fn encode(&self, _registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        match value {
            Value::Long(v) => Ok(v.to_be_bytes().to_vec()),
            other => Err(mismatch("long", other)),
        }
    }

    fn decode(&self, _registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let b = exact_width(data, 8)?;
        Ok(Value::Long(i64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ])))
    }

    fn encode_text(&self, _registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        match value {
            Value::Long(v) => Ok(JsonValue::from(*v)),
            other => Err(mismatch("long", other)),
        }
    }

    fn decode_text(&self, _registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        node.as_i64()
            .map(Value::Long)
            .ok_or_else(|| wrong_node("long number", node))
    }
}

/// IEEE 754 single-precision floats, 4 bytes big-endian.
pub struct FloatCodec;

impl Codec for FloatCodec {
    fn encode(&self, _registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        match value {
            Value::Float(v) => Ok(v.to_be_bytes().to_vec()),
            other => Err(mismatch("float", other)),
        }
    }

    fn decode(&self, _registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let b = exact_width(data, 4)?;
        Ok(Value::Float(f32::from_be_bytes([b[0], b[1], b[2], b[3]])))
    }

    fn encode_text(&self, _registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        match value {
            Value::Float(v) => serde_json::Number::from_f64(*v as f64)
                .map(JsonValue::Number)
                .ok_or(EncodeError::NonFiniteNumber),
            other => Err(mismatch("float", other)),
        }
    }

    fn decode_text(&self, _registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        node.as_f64()
            .map(|v| Value::Float(v as f32))
            .ok_or_else(|| wrong_node("float number", node))
    }
}

/// IEEE 754 double-precision floats, 8 bytes big-endian.
pub struct DoubleCodec;

impl Codec for DoubleCodec {
    fn encode(&self, _registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        match value {
            Value::Double(v) => Ok(v.to_be_bytes().to_vec()),
            other => Err(mismatch("double", other)),
        }
    }

    fn decode(&self, _registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        let b = exact_width(data, 8)?;
        Ok(Value::Double(f64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ])))
    }

    fn encode_text(&self, _registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        match value {
            Value::Double(v) => serde_json::Number::from_f64(*v)
                .map(JsonValue::Number)
                .ok_or(EncodeError::NonFiniteNumber),
            other => Err(mismatch("double", other)),
        }
    }

    fn decode_text(&self, _registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        node.as_f64()
            .map(Value::Double)
            .ok_or_else(|| wrong_node("double number", node))
    }
}

/// UTF-8 strings. The binary form is the raw bytes; the enclosing frame
/// carries the length.
pub struct StrCodec;

impl Codec for StrCodec {
    fn encode(&self, _registry: &Registry, value: &Value) -> Result<Vec<u8>, EncodeError> {
        match value {
            Value::Str(s) => Ok(s.as_bytes().to_vec()),
            other => Err(mismatch("str", other)),
        }
    }

    fn decode(&self, _registry: &Registry, data: &[u8]) -> Result<Value, DecodeError> {
        Ok(Value::Str(String::from_utf8(data.to_vec())?))
    }

    fn encode_text(&self, _registry: &Registry, value: &Value) -> Result<JsonValue, EncodeError> {
        match value {
            Value::Str(s) => Ok(JsonValue::String(s.clone())),
            other => Err(mismatch("str", other)),
        }
    }

    fn decode_text(&self, _registry: &Registry, node: &JsonValue) -> Result<Value, DecodeError> {
        match node {
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            // Absent text decodes as empty rather than failing.
            JsonValue::Null => Ok(Value::Str(String::new())),
            other => Err(wrong_node("string", other)),
        }
    }

    // A string key is the key itself; the default would try to parse
    // numeric-looking keys as numbers first.
    fn decode_text_key(&self, _registry: &Registry, key: &str) -> Result<Value, DecodeError> {
        Ok(Value::Str(key.to_owned()))
    }
}
