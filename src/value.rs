use std::collections::HashMap;
use std::fmt;

/// Dynamic value model for the codec, similar in spirit to `serde_json::Value`.
///
/// Represents any value the engine can encode or decode: six scalar kinds,
/// ordered sequences, associative maps, and versioned records.
#[derive(Clone, Debug)]
pub enum Value {
    /// Signed 8-bit integer.
    Byte(i8),
    /// Signed 32-bit integer.
    Int(i32),
    /// Signed 64-bit integer.
    Long(i64),
    /// IEEE 754 single-precision floating point.
    Float(f32),
    /// IEEE 754 double-precision floating point.
    Double(f64),
    /// UTF-8 string.
    Str(String),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// Key/value pairs in iteration order. The order carries no meaning;
    /// equality is pair-exact but order-independent.
    Map(Vec<(Value, Value)>),
    /// A record with named, version-ranged fields.
    Record(Record),
}

impl Value {
    /// Get as i32.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as i64.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f64.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Get as sequence slice.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(v) => Some(v),
            _ => None,
        }
    }

    /// Get as map entries.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Get as record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a short type description string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Byte(_) => "byte",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Str(_) => "str",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| b.iter().any(|(bk, bv)| k == bk && v == bv))
            }
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "\"{}\"", v),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{ ")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, " }}")
            }
            Value::Record(record) => write!(f, "{}", record),
        }
    }
}

/// A dynamic record value: a schema version plus named field values.
///
/// The version governs which fields of the record's schema are included in
/// an encoding; the field map holds whatever the caller (or a decode) put
/// there, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    version: i32,
    fields: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record at version 0.
    pub fn new() -> Self {
        Record::default()
    }

    /// Create an empty record at the given schema version.
    pub fn with_version(version: i32) -> Self {
        Record {
            version,
            fields: HashMap::new(),
        }
    }

    /// Helper to build a record from name/value pairs, at version 0.
    pub fn from_fields(fields: Vec<(&str, Value)>) -> Self {
        let mut record = Record::new();
        for (name, value) in fields {
            record.set(name, value);
        }
        record
    }

    /// Builder-style field setter.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value.into());
        self
    }

    /// The record's schema version.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Set a field value, replacing any previous value under that name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Remove and return a field value by name.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Number of field values present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no field values.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ version: {}", self.version)?;
        for (name, value) in &self.fields {
            write!(f, ", {}: {}", name, value)?;
        }
        write!(f, " }}")
    }
}

// Conversion traits
impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Value::Seq(v.into_iter().map(Value::Int).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::Seq(v.into_iter().map(Value::Long).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Seq(v.into_iter().map(Value::Str).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Long(42));
        assert_eq!(Value::from("hello"), Value::Str("hello".into()));
        assert_eq!(Value::from(3.5f64), Value::Double(3.5));
    }

    #[test]
    fn test_record_builder() {
        let record = Record::with_version(2)
            .field("name", "Alice")
            .field("age", 13i32);
        assert_eq!(record.version(), 2);
        assert_eq!(record.get("name"), Some(&Value::Str("Alice".into())));
        assert_eq!(record.get("age"), Some(&Value::Int(13)));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_eq!(Value::Double(0.1), Value::Double(0.1));
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_ne!(Value::Int(1), Value::Long(1));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = Value::Map(vec![
            (Value::Str("x".into()), Value::Int(1)),
            (Value::Str("y".into()), Value::Int(2)),
        ]);
        let b = Value::Map(vec![
            (Value::Str("y".into()), Value::Int(2)),
            (Value::Str("x".into()), Value::Int(1)),
        ]);
        assert_eq!(a, b);

        let c = Value::Map(vec![
            (Value::Str("x".into()), Value::Int(2)),
            (Value::Str("y".into()), Value::Int(1)),
        ]);
        assert_ne!(a, c);
    }
}
