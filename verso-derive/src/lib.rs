//! Derive macro for verso versioned records.
//!
//! `#[derive(VersionedRecord)]` turns a struct with `#[verso]`-tagged
//! fields into a record type: it generates the field schema (names,
//! type keys, version ranges, in declaration order) and the conversions
//! between the struct and verso's dynamic value model.
//!
//! # Example
//!
//! ```rust,ignore
//! use verso::VersionedRecord;
//!
//! #[derive(VersionedRecord)]
//! struct Profile {
//!     #[verso(version)]
//!     version: i32,
//!     #[verso(from = 1, until = 4)]
//!     nickname: String,
//!     #[verso]
//!     age: i32,
//! }
//! ```

mod attr;
mod expand;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for generating `VersionedRecord`, `ToValue` and
/// `FromValue` implementations.
///
/// # Attributes
///
/// - `#[verso]` - Serialize this field over the full version range.
/// - `#[verso(from = A, until = B)]` - Serialize this field for schema
///   versions in the inclusive range `[A, B]`. Either bound may be
///   omitted; they default to `0` and `i32::MAX`.
/// - `#[verso(version)]` - This `i32` field carries the record's schema
///   version. It is written into the envelope, not serialized as a field.
/// - `#[verso(name = "...")]` on the struct - Override the registry name
///   (defaults to the struct name).
///
/// Fields without any `#[verso]` attribute are not serialized and are
/// default-constructed on decode, as are fields outside the envelope's
/// version range.
#[proc_macro_derive(VersionedRecord, attributes(verso))]
pub fn derive_versioned_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand::derive_versioned_record(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
