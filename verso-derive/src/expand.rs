//! Code generation for the VersionedRecord derive macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Ident, Result, Type};

use crate::attr::{FieldAttrs, StructAttrs};

struct SerializedField {
    ident: Ident,
    ty: Type,
    from: i32,
    until: i32,
}

/// Generate the `VersionedRecord`, `ToValue` and `FromValue`
/// implementations for a struct.
pub fn derive_versioned_record(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;
    let record_name = struct_attrs.name.unwrap_or_else(|| name.to_string());

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "VersionedRecord only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "VersionedRecord only supports structs",
            ))
        }
    };

    let mut version_field: Option<Ident> = None;
    let mut serialized: Vec<SerializedField> = Vec::new();
    let mut skipped: Vec<Ident> = Vec::new();

    for field in fields {
        let ident = field.ident.clone().unwrap();
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;

        if attrs.version {
            if version_field.is_some() {
                return Err(syn::Error::new(
                    ident.span(),
                    "duplicate #[verso(version)] field",
                ));
            }
            version_field = Some(ident);
        } else if attrs.included {
            serialized.push(SerializedField {
                ident,
                ty: field.ty.clone(),
                from: attrs.from.unwrap_or(0),
                until: attrs.until.unwrap_or(i32::MAX),
            });
        } else {
            skipped.push(ident);
        }
    }

    if serialized.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "VersionedRecord needs at least one #[verso] field",
        ));
    }

    // Schema: one builder call per field, in declaration order.
    let schema_fields = serialized.iter().map(|field| {
        let name_str = field.ident.to_string();
        let ty = &field.ty;
        let from = field.from;
        let until = field.until;
        if from == 0 && until == i32::MAX {
            quote! { .field(#name_str, <#ty as ::verso::ToValue>::type_key()) }
        } else {
            quote! { .ranged_field(#name_str, <#ty as ::verso::ToValue>::type_key(), #from, #until) }
        }
    });
    let version_call = version_field
        .is_some()
        .then(|| quote! { .version_field() })
        .unwrap_or_default();

    let version_expr = match &version_field {
        Some(ident) => quote! { self.#ident },
        None => quote! { 0i32 },
    };

    let field_sets = serialized.iter().map(|field| {
        let ident = &field.ident;
        let name_str = ident.to_string();
        quote! {
            record.set(#name_str, ::verso::ToValue::to_value(&self.#ident));
        }
    });

    let field_takes = serialized.iter().map(|field| {
        let ident = &field.ident;
        let name_str = ident.to_string();
        quote! {
            #ident: match record.take(#name_str) {
                ::std::option::Option::Some(value) => ::verso::FromValue::from_value(value)?,
                ::std::option::Option::None => ::std::default::Default::default(),
            },
        }
    });
    let version_init = version_field
        .as_ref()
        .map(|ident| quote! { #ident: record.version(), })
        .unwrap_or_default();
    let skipped_inits = skipped.iter().map(|ident| {
        quote! { #ident: ::std::default::Default::default(), }
    });

    Ok(quote! {
        impl ::verso::VersionedRecord for #name {
            const NAME: &'static str = #record_name;

            fn schema() -> ::verso::types::RecordSchema {
                ::verso::types::RecordSchema::builder(Self::NAME)
                    #version_call
                    #(#schema_fields)*
                    .build()
            }
        }

        impl ::verso::ToValue for #name {
            fn type_key() -> ::verso::types::TypeKey {
                ::verso::types::TypeKey::record(Self::NAME)
            }

            fn to_value(&self) -> ::verso::Value {
                let mut record = ::verso::value::Record::with_version(#version_expr);
                #(#field_sets)*
                ::verso::Value::Record(record)
            }
        }

        impl ::verso::FromValue for #name {
            fn from_value(value: ::verso::Value) -> ::std::result::Result<Self, ::verso::error::DecodeError> {
                let mut record = match value {
                    ::verso::Value::Record(record) => record,
                    other => {
                        return ::std::result::Result::Err(::verso::error::DecodeError::Instantiation {
                            type_name: Self::NAME.to_string(),
                            reason: ::std::format!("expected record value, got {}", other.type_name()),
                        });
                    }
                };
                ::std::result::Result::Ok(Self {
                    #version_init
                    #(#field_takes)*
                    #(#skipped_inits)*
                })
            }
        }
    })
}
