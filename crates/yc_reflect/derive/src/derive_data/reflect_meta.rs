use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;
use crate::path::fp::{AnyFP, SendFP, SyncFP};

/// Everything about the derived type that does not depend on its kind.
pub(crate) struct ReflectMeta<'a> {
    yc_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    /// Field types with the bound they need: `true` for persisted fields
    /// (`Reflect + Typed`), `false` for skipped ones (`Any`).
    field_types: Vec<(&'a Type, bool)>,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("yc_reflect_path", &self.yc_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            yc_reflect_path: crate::path::yc_reflect(),
            attrs,
            ident,
            generics,
            field_types: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn set_field_types(&mut self, field_types: Vec<(&'a Type, bool)>) {
        self.field_types = field_types;
    }

    #[inline]
    pub fn yc_reflect_path(&self) -> &Path {
        &self.yc_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Whether every instantiation needs its own type info.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Returns `impl_generics`, `ty_generics` and the full `where` clause.
    ///
    /// For generic types the clause requires:
    ///
    /// - `Self: Any + Send + Sync`;
    /// - `Default` on `Self` if `#[reflect(default)]` is present;
    /// - `Reflect + Typed` on persisted field types naming a type parameter,
    ///   `Any` on skipped ones.
    ///
    /// Non-generic types keep their own `where` clause only.
    pub fn split_generics(&self) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates = Vec::new();
        if let Some(where_clause) = where_clause {
            predicates.extend(where_clause.predicates.iter().map(ToTokens::to_token_stream));
        }

        let params: Vec<&Ident> = self.generics.type_params().map(|p| &p.ident).collect();
        if !params.is_empty() {
            predicates.push(quote!(Self: #AnyFP + #SendFP + #SyncFP));

            if self.attrs.default.is_some() {
                predicates.push(quote!(Self: ::core::default::Default));
            }

            let reflect_ = crate::path::reflect_(&self.yc_reflect_path);
            let typed_ = crate::path::typed_(&self.yc_reflect_path);
            for (ty, persisted) in &self.field_types {
                if !mentions_any(&params, ty.to_token_stream()) {
                    continue;
                }
                if *persisted {
                    predicates.push(quote!(#ty: #reflect_ + #typed_));
                } else {
                    predicates.push(quote!(#ty: #AnyFP));
                }
            }
        }

        let where_clause = if predicates.is_empty() {
            crate::utils::empty()
        } else {
            quote!(where #(#predicates,)*)
        };

        (impl_generics, ty_generics, where_clause)
    }

    /// `.with_default::<Self>()` if the type is declared `default`.
    pub fn with_default_tokens(&self) -> TokenStream {
        if self.attrs.default.is_some() {
            quote!(.with_default::<Self>())
        } else {
            crate::utils::empty()
        }
    }

    /// Type info of an opaque or scalar type.
    pub fn to_opaque_info_tokens(&self, variant: TokenStream) -> TokenStream {
        let type_info_ = crate::path::type_info_(&self.yc_reflect_path);
        let opaque_info_ = crate::path::opaque_info_(&self.yc_reflect_path);
        let with_default = self.with_default_tokens();

        quote! {
            #type_info_::#variant(
                #opaque_info_::new::<Self>()
                    #with_default
            )
        }
    }
}

/// Does any of `idents` appear in `tokens`?
fn mentions_any(idents: &[&Ident], tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => idents.contains(&&ident),
        proc_macro2::TokenTree::Group(group) => mentions_any(idents, group.stream()),
        _ => false,
    })
}
