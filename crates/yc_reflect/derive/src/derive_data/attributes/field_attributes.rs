use proc_macro2::Span;
use syn::{Attribute, LitStr};

use super::set_flag;
use crate::REFLECT_ATTRIBUTE_NAME;

/// Attributes of a field or of an enum variant.
///
/// ```ignore
/// #[derive(Reflect)]
/// struct Foo {
///     #[reflect(rename = "y-level", comment = "Height of the spawn")]
///     height: i32,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    /// `skip`: kept in the descriptor but never persisted.
    pub skip: Option<Span>,
    /// `ignore`: removed from reflection entirely.
    pub ignore: Option<Span>,
    /// `rename = "..."`: the document key.
    pub rename: Option<LitStr>,
    /// `comment = "..."`, repeatable.
    pub comments: Vec<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    set_flag(&mut res.skip, &meta)
                } else if meta.path.is_ident("ignore") {
                    set_flag(&mut res.ignore, &meta)
                } else if meta.path.is_ident("rename") {
                    if res.rename.is_some() {
                        return Err(meta.error("duplicate attribute"));
                    }
                    res.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("comment") {
                    res.comments.push(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error(
                        "unsupported field attribute, expected one of: skip, ignore, rename, comment",
                    ))
                }
            })?;
        }

        if let (Some(_), Some(span)) = (res.skip, res.ignore) {
            return Err(syn::Error::new(
                span,
                "`skip` and `ignore` cannot be used together",
            ));
        }

        Ok(res)
    }

    /// Rejects the attributes that only make sense on struct fields.
    pub fn check_variant(&self) -> syn::Result<()> {
        let span = self
            .skip
            .or(self.ignore)
            .or_else(|| self.comments.first().map(LitStr::span));
        match span {
            Some(span) => Err(syn::Error::new(
                span,
                "only `rename` is supported on enum variants",
            )),
            None => Ok(()),
        }
    }
}
