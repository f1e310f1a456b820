//! Attribute parsing for the VersionedRecord derive macro.

use proc_macro2::Span;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, Result};

/// Parsed field attributes from #[verso(...)]
#[derive(Default)]
pub struct FieldAttrs {
    /// Whether the field carries a #[verso] attribute at all.
    pub included: bool,
    /// Whether this field is the record's version field.
    pub version: bool,
    /// First schema version including the field (defaults to 0).
    pub from: Option<i32>,
    /// Last schema version including the field (defaults to i32::MAX).
    pub until: Option<i32>,
}

impl FieldAttrs {
    /// Parse attributes from a field.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut result = FieldAttrs::default();

        for attr in attrs {
            if attr.path().is_ident("verso") {
                result.parse_verso_attr(attr)?;
            }
        }

        if result.version && (result.from.is_some() || result.until.is_some()) {
            return Err(syn::Error::new(
                Span::call_site(),
                "a #[verso(version)] field takes no from/until range",
            ));
        }

        Ok(result)
    }

    fn parse_verso_attr(&mut self, attr: &Attribute) -> Result<()> {
        self.included = true;

        // Bare #[verso]: full version range.
        if matches!(attr.meta, Meta::Path(_)) {
            return Ok(());
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("version") {
                self.version = true;
                self.included = false;
                Ok(())
            } else if meta.path.is_ident("from") {
                self.from = Some(parse_int(meta.value()?.parse()?)?);
                Ok(())
            } else if meta.path.is_ident("until") {
                self.until = Some(parse_int(meta.value()?.parse()?)?);
                Ok(())
            } else {
                Err(syn::Error::new_spanned(
                    meta.path,
                    "unknown verso attribute",
                ))
            }
        })
    }
}

fn parse_int(value: Expr) -> Result<i32> {
    if let Expr::Lit(ExprLit {
        lit: Lit::Int(lit), ..
    }) = value
    {
        lit.base10_parse()
    } else {
        Err(syn::Error::new_spanned(value, "expected integer literal"))
    }
}

/// Parsed struct-level attributes.
#[derive(Default)]
pub struct StructAttrs {
    /// Custom record name (defaults to struct name).
    pub name: Option<String>,
}

impl StructAttrs {
    /// Parse attributes from a struct.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut result = StructAttrs::default();

        for attr in attrs {
            if attr.path().is_ident("verso") {
                result.parse_verso_attr(attr)?;
            }
        }

        Ok(result)
    }

    fn parse_verso_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: Expr = meta.value()?.parse()?;
                if let Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) = value
                {
                    self.name = Some(lit.value());
                    Ok(())
                } else {
                    Err(syn::Error::new_spanned(value, "expected string literal"))
                }
            } else {
                Err(syn::Error::new_spanned(
                    meta.path,
                    "unknown verso attribute",
                ))
            }
        })
    }
}
