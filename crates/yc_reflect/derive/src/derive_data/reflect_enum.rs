use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::ReflectMeta;

/// A non-empty enum with unit variants only.
pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    pub variants: Vec<EnumVariant<'a>>,
}

pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    /// The name stored in documents.
    pub name: String,
}

impl<'a> ReflectEnum<'a> {
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Generates the `TypeInfo::Enum(...)` expression.
    ///
    /// Without `#[reflect(default)]` the first variant is the default.
    pub fn to_info_tokens(&self) -> TokenStream {
        let yc_reflect_path = self.meta.yc_reflect_path();
        let type_info_ = crate::path::type_info_(yc_reflect_path);
        let enum_info_ = crate::path::enum_info_(yc_reflect_path);
        let reflect_ = crate::path::reflect_(yc_reflect_path);
        let box_ = crate::path::macro_exports_(yc_reflect_path);

        let names = self.variants.iter().map(|v| &v.name);

        let ctor = if self.meta.attrs().default.is_some() {
            self.meta.with_default_tokens()
        } else {
            let first = self.variants[0].ident;
            quote! {
                .with_ctor(|| -> #box_::alloc_utils::Box<dyn #reflect_> {
                    #box_::alloc_utils::Box::new(Self::#first)
                })
            }
        };

        quote! {
            #type_info_::Enum(
                #enum_info_::new::<Self>(&[ #(#names),* ])
                    #ctor
            )
        }
    }
}
