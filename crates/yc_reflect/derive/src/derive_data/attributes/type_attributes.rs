use proc_macro2::Span;
use syn::{Attribute, LitStr};

use super::set_flag;
use crate::REFLECT_ATTRIBUTE_NAME;
use crate::derive_data::RenameRule;

/// Attributes at the type level.
///
/// ```ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default, rename_all = "snake_case")]
/// struct Foo { /* ... */ }
/// ```
#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    /// `default`: the type implements `Default`, used to construct values.
    pub default: Option<Span>,
    /// `opaque`: no structure is exposed, a converter is required.
    pub opaque: Option<Span>,
    /// `scalar`: stored as text through `Display` and `FromStr`.
    pub scalar: Option<Span>,
    /// `convert`: registers the `Convert` impl of the type.
    pub convert: Option<Span>,
    /// `key_convert`: registers the `KeyConvert` impl of the type.
    pub key_convert: Option<Span>,
    /// `rename_all = "..."`: the key projection of fields or variants.
    pub rename_all: Option<RenameRule>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    set_flag(&mut res.default, &meta)
                } else if meta.path.is_ident("opaque") {
                    set_flag(&mut res.opaque, &meta)
                } else if meta.path.is_ident("scalar") {
                    set_flag(&mut res.scalar, &meta)
                } else if meta.path.is_ident("convert") {
                    set_flag(&mut res.convert, &meta)
                } else if meta.path.is_ident("key_convert") {
                    set_flag(&mut res.key_convert, &meta)
                } else if meta.path.is_ident("rename_all") {
                    if res.rename_all.is_some() {
                        return Err(meta.error("duplicate attribute"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    res.rename_all = Some(RenameRule::from_lit(&lit)?);
                    Ok(())
                } else {
                    Err(meta.error(
                        "unsupported type attribute, expected one of: \
                         default, opaque, scalar, convert, key_convert, rename_all",
                    ))
                }
            })?;
        }

        if let (Some(_), Some(span)) = (res.opaque, res.scalar) {
            return Err(syn::Error::new(
                span,
                "`opaque` and `scalar` cannot be used together",
            ));
        }

        Ok(res)
    }
}
