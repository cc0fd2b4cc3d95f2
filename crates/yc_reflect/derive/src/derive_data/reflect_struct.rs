use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Field, Ident};

use super::{FieldAttributes, ReflectMeta, RenameRule};

/// A struct with named fields.
pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    /// Fields in declaration order, `#[reflect(ignore)]` ones included.
    pub fields: Vec<StructField<'a>>,
}

pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// The index among the fields that are not ignored.
    pub reflect_index: Option<usize>,
    /// The document key.
    pub key: String,
}

impl<'a> StructField<'a> {
    pub fn new(data: &'a Field, rule: RenameRule) -> syn::Result<Self> {
        let attrs = FieldAttributes::parse_attrs(&data.attrs)?;
        let key = match &attrs.rename {
            Some(lit) => lit.value(),
            None => rule.apply(&Self::name_of(data)),
        };
        Ok(Self {
            data,
            attrs,
            reflect_index: None,
            key,
        })
    }

    fn name_of(data: &Field) -> String {
        data.ident
            .as_ref()
            .map(|ident| ident.unraw().to_string())
            .unwrap_or_default()
    }

    /// The member identifier, `r#` kept.
    #[inline]
    pub fn ident(&self) -> Option<&'a Ident> {
        self.data.ident.as_ref()
    }

    /// The identifier as a string, `r#` stripped.
    #[inline]
    pub fn name(&self) -> String {
        Self::name_of(self.data)
    }

    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.attrs.skip.is_some()
    }

    /// Generates the `NamedField` of this field.
    pub fn to_info_tokens(&self, yc_reflect_path: &syn::Path) -> TokenStream {
        let named_field_ = crate::path::named_field_(yc_reflect_path);
        let ty = &self.data.ty;
        let name = self.name();
        let key = &self.key;

        if self.is_skipped() {
            return quote!(#named_field_::skipped::<#ty>(#name, #key));
        }

        let with_comments = if self.attrs.comments.is_empty() {
            crate::utils::empty()
        } else {
            let comments = &self.attrs.comments;
            quote!(.with_comments(&[#(#comments),*]))
        };

        quote!(#named_field_::new::<#ty>(#name, #key) #with_comments)
    }
}

impl<'a> ReflectStruct<'a> {
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields exposed to reflection, skipped ones included.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|f| f.reflect_index.is_some())
    }

    /// Fields whose values can be accessed.
    pub fn persisted_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.active_fields().filter(|f| !f.is_skipped())
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.active_fields().count()
    }

    /// Generates the `TypeInfo::Struct(...)` expression.
    pub fn to_info_tokens(&self) -> TokenStream {
        let yc_reflect_path = self.meta.yc_reflect_path();
        let type_info_ = crate::path::type_info_(yc_reflect_path);
        let struct_info_ = crate::path::struct_info_(yc_reflect_path);
        let fields = self
            .active_fields()
            .map(|field| field.to_info_tokens(yc_reflect_path));
        let with_default = self.meta.with_default_tokens();

        quote! {
            #type_info_::Struct(
                #struct_info_::new::<Self>(&[ #(#fields),* ])
                    #with_default
            )
        }
    }
}
