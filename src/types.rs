use std::fmt;

/// Registry lookup key identifying a storable type: a scalar kind, a
/// container shape, or a named record type.
///
/// Container keys carry their element keys, so one `TypeKey` fully
/// describes a field's shape down to the scalars.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Byte,
    Int,
    Long,
    Float,
    Double,
    Str,
    /// Ordered sequence of the inner type.
    Seq(Box<TypeKey>),
    /// Associative map from key type to value type.
    Map(Box<TypeKey>, Box<TypeKey>),
    /// A named record type registered by the host.
    Record(String),
}

impl TypeKey {
    /// Sequence-of-`elem` key.
    pub fn seq(elem: TypeKey) -> Self {
        TypeKey::Seq(Box::new(elem))
    }

    /// Map-of-`key`-to-`value` key.
    pub fn map(key: TypeKey, value: TypeKey) -> Self {
        TypeKey::Map(Box::new(key), Box::new(value))
    }

    /// Named record key.
    pub fn record(name: impl Into<String>) -> Self {
        TypeKey::Record(name.into())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Byte => f.write_str("byte"),
            TypeKey::Int => f.write_str("int"),
            TypeKey::Long => f.write_str("long"),
            TypeKey::Float => f.write_str("float"),
            TypeKey::Double => f.write_str("double"),
            TypeKey::Str => f.write_str("str"),
            TypeKey::Seq(elem) => write!(f, "seq<{}>", elem),
            TypeKey::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            TypeKey::Record(name) => f.write_str(name),
        }
    }
}

/// A single serializable field of a record schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, used for text envelopes and record value lookup.
    pub name: String,
    /// The field's declared type.
    pub key: TypeKey,
    /// First schema version that includes this field (inclusive).
    pub from: i32,
    /// Last schema version that includes this field (inclusive).
    pub until: i32,
}

impl FieldDescriptor {
    /// Descriptor with the full version range.
    pub fn new(name: impl Into<String>, key: TypeKey) -> Self {
        FieldDescriptor {
            name: name.into(),
            key,
            from: 0,
            until: i32::MAX,
        }
    }

    /// Descriptor with an explicit inclusive `[from, until]` range.
    pub fn ranged(name: impl Into<String>, key: TypeKey, from: i32, until: i32) -> Self {
        FieldDescriptor {
            name: name.into(),
            key,
            from,
            until,
        }
    }

    /// Whether this field is included at the given schema version.
    pub fn in_range(&self, version: i32) -> bool {
        self.from <= version && version <= self.until
    }
}

/// The derived schema of a record type.
///
/// Field order is the declaration order of the record's serializable fields.
/// The binary envelope is positional, so this order is load-bearing: it must
/// be identical on encode and decode of the same type.
#[derive(Clone, Debug)]
pub struct RecordSchema {
    /// Record type name, used as the registry key.
    pub name: String,
    /// Whether the record type designates a version field. Without one the
    /// version is 0 on encode and decode.
    pub has_version: bool,
    /// Serializable fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    /// Start building a schema for the named record type.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            has_version: false,
            fields: Vec::new(),
        }
    }

    /// Fields included at the given schema version, in declaration order.
    pub fn in_range(&self, version: i32) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.in_range(version))
    }

    /// Find a field descriptor by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builder for hand-written schema registration.
pub struct SchemaBuilder {
    name: String,
    has_version: bool,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    /// Mark the record type as carrying a version field.
    pub fn version_field(mut self) -> Self {
        self.has_version = true;
        self
    }

    /// Add a field with the full version range.
    pub fn field(mut self, name: impl Into<String>, key: TypeKey) -> Self {
        self.fields.push(FieldDescriptor::new(name, key));
        self
    }

    /// Add a field with an explicit inclusive `[from, until]` range.
    pub fn ranged_field(
        mut self,
        name: impl Into<String>,
        key: TypeKey,
        from: i32,
        until: i32,
    ) -> Self {
        self.fields.push(FieldDescriptor::ranged(name, key, from, until));
        self
    }

    /// Finish the schema.
    pub fn build(self) -> RecordSchema {
        RecordSchema {
            name: self.name,
            has_version: self.has_version,
            fields: self.fields,
        }
    }
}
