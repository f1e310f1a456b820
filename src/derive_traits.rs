//! Traits bridging static Rust types and the dynamic [`Value`] model.
//!
//! [`VersionedRecord`] is implemented by `#[derive(VersionedRecord)]` from
//! the `verso-derive` crate, together with the [`ToValue`]/[`FromValue`]
//! pair; all three can also be written by hand for types outside the
//! derive's reach.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::DecodeError;
use crate::types::{RecordSchema, TypeKey};
use crate::value::Value;

/// A record type with a derived (or hand-written) field schema.
///
/// # Example
///
/// ```rust
/// use verso::{Registry, VersionedRecord};
///
/// #[derive(Debug, PartialEq, VersionedRecord)]
/// struct Person {
///     #[verso]
///     name: String,
///     #[verso(from = 1, until = 4)]
///     nickname: String,
/// }
///
/// let registry = Registry::new();
/// registry.register_record::<Person>();
/// ```
pub trait VersionedRecord {
    /// Registry name for this record type.
    const NAME: &'static str;

    /// Build the field schema. Called once at registration; the registry
    /// holds the result for its lifetime.
    fn schema() -> RecordSchema;
}

/// Conversion from a static Rust type into the dynamic [`Value`] model.
pub trait ToValue {
    /// The registry key describing this type.
    fn type_key() -> TypeKey;

    /// Convert into a dynamic value.
    fn to_value(&self) -> Value;
}

/// Conversion from the dynamic [`Value`] model back into a static type.
pub trait FromValue: Sized {
    /// Convert from a dynamic value, failing if the value's shape does not
    /// match this type.
    fn from_value(value: Value) -> Result<Self, DecodeError>;
}

fn wrong_shape(expected: &str, actual: &Value) -> DecodeError {
    DecodeError::SchemaMismatch(format!(
        "expected {} value, got {}",
        expected,
        actual.type_name()
    ))
}

impl ToValue for i8 {
    fn type_key() -> TypeKey {
        TypeKey::Byte
    }

    fn to_value(&self) -> Value {
        Value::Byte(*self)
    }
}

impl FromValue for i8 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Byte(v) => Ok(v),
            other => Err(wrong_shape("byte", &other)),
        }
    }
}

impl ToValue for i32 {
    fn type_key() -> TypeKey {
        TypeKey::Int
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Int(v) => Ok(v),
            other => Err(wrong_shape("int", &other)),
        }
    }
}

impl ToValue for i64 {
    fn type_key() -> TypeKey {
        TypeKey::Long
    }

    fn to_value(&self) -> Value {
        Value::Long(*self)
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Long(v) => Ok(v),
            other => Err(wrong_shape("long", &other)),
        }
    }
}

impl ToValue for f32 {
    fn type_key() -> TypeKey {
        TypeKey::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(wrong_shape("float", &other)),
        }
    }
}

impl ToValue for f64 {
    fn type_key() -> TypeKey {
        TypeKey::Double
    }

    fn to_value(&self) -> Value {
        Value::Double(*self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Double(v) => Ok(v),
            other => Err(wrong_shape("double", &other)),
        }
    }
}

impl ToValue for String {
    fn type_key() -> TypeKey {
        TypeKey::Str
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Str(v) => Ok(v),
            other => Err(wrong_shape("str", &other)),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn type_key() -> TypeKey {
        TypeKey::seq(T::type_key())
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Seq(items) => items.into_iter().map(FromValue::from_value).collect(),
            other => Err(wrong_shape("seq", &other)),
        }
    }
}

impl<K: ToValue + Eq + Hash, V: ToValue> ToValue for HashMap<K, V> {
    fn type_key() -> TypeKey {
        TypeKey::map(K::type_key(), V::type_key())
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
}

impl<K: FromValue + Eq + Hash, V: FromValue> FromValue for HashMap<K, V> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(wrong_shape("map", &other)),
        }
    }
}
