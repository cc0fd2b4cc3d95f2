use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectEnum;

/// Implements reflection for a fieldless enum.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();

    // trait: Typed
    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens());

    // trait: Enum
    let enum_trait_tokens = impl_trait_enum(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Enum));

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #auto_register_tokens

        #typed_trait_tokens

        #enum_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generates the `Enum` implementation.
fn impl_trait_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();
    let enum_ = crate::path::enum_(meta.yc_reflect_path());

    let idents: Vec<_> = info.variants.iter().map(|v| v.ident).collect();
    let names: Vec<_> = info.variants.iter().map(|v| v.name.as_str()).collect();
    let indices = 0..info.variants.len();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #enum_ for #ident #ty_generics #where_clause {
            fn variant_name(&self) -> &'static str {
                match self {
                    #( Self::#idents => #names, )*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #( Self::#idents => #indices, )*
                }
            }

            fn set_variant(&mut self, name: &str) -> bool {
                *self = match name {
                    #( #names => Self::#idents, )*
                    _ => return false,
                };
                true
            }
        }
    }
}
