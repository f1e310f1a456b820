//! Verso: a versioned record codec with binary and JSON text envelopes.
//!
//! Records declare an inclusive `[from, until]` schema-version range per
//! field; an encoding at version `v` includes exactly the fields whose
//! range covers `v`, so record shapes can evolve without breaking older
//! readers. The same recursive field walk drives two envelopes: a compact
//! length-prefixed binary form and an equivalent JSON document.
//!
//! # Quick Start
//!
//! ```rust
//! use verso::{codec, Registry, VersionedRecord};
//!
//! #[derive(Debug, PartialEq, VersionedRecord)]
//! struct Person {
//!     #[verso]
//!     name: String,
//!     #[verso]
//!     age: i32,
//! }
//!
//! let registry = Registry::new();
//! registry.register_record::<Person>();
//!
//! let person = Person { name: "Alice".into(), age: 30 };
//! let bytes = codec::encode_record(&registry, &person).unwrap();
//! let decoded: Person = codec::decode_record(&registry, &bytes).unwrap();
//! assert_eq!(person, decoded);
//! ```
//!
//! Version-gated fields use `#[verso(from = a, until = b)]`, and a field
//! marked `#[verso(version)]` carries the record's schema version. The
//! dynamic [`Value`] model and [`SchemaBuilder`] cover types the derive
//! cannot reach.

pub mod codec;
pub mod derive_traits;
pub mod error;
pub mod registry;
pub mod types;
pub mod value;

pub use codec::Codec;
pub use derive_traits::{FromValue, ToValue, VersionedRecord};
pub use error::{DecodeError, EncodeError, Result, VersoError};
pub use registry::Registry;
pub use types::{FieldDescriptor, RecordSchema, SchemaBuilder, TypeKey};
pub use value::{Record, Value};

// Re-export the derive macro when the feature is enabled
#[cfg(feature = "derive")]
pub use verso_derive::VersionedRecord;
