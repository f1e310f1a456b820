/// Errors from the encode half of a codec.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("no codec registered for type '{0}'")]
    UnsupportedType(String),

    #[error("nothing to serialize for '{type_name}' at version {version}")]
    EmptyPayload { type_name: String, version: i32 },

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("missing value for field '{field}' of '{type_name}'")]
    MissingField { type_name: String, field: String },

    #[error("non-finite number has no text representation")]
    NonFiniteNumber,
}

/// Errors from the decode half of a codec.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated data: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("no codec registered for type '{0}'")]
    UnsupportedType(String),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("cannot instantiate '{type_name}': {reason}")]
    Instantiation { type_name: String, reason: String },

    #[error("invalid utf-8 string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid text document: {0}")]
    InvalidText(#[from] serde_json::Error),
}

/// Top-level error type that wraps both halves.
#[derive(Debug, thiserror::Error)]
pub enum VersoError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, VersoError>;
