use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{get_auto_register_impl, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectStruct;
use crate::path::fp::OptionFP;

/// Implements reflection for a struct with named fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    // trait: Typed
    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens());

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Struct));

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #auto_register_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generates the `Struct` implementation.
///
/// Skipped fields keep their index but are never handed out.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let yc_reflect_path = meta.yc_reflect_path();
    let struct_ = crate::path::struct_(yc_reflect_path);
    let reflect_ = crate::path::reflect_(yc_reflect_path);
    let option_ = OptionFP.to_token_stream();

    let mut names = Vec::new();
    let mut indices = Vec::new();
    let mut members = Vec::new();
    for field in info.persisted_fields() {
        let (Some(ident), Some(index)) = (field.ident(), field.reflect_index) else {
            continue;
        };
        names.push(field.name());
        indices.push(index);
        members.push(ident);
    }
    let field_len = info.active_len();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #( #names => #option_::Some(#reflect_::as_reflect(&self.#members)), )*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #( #names => #option_::Some(#reflect_::as_reflect_mut(&mut self.#members)), )*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #( #indices => #option_::Some(#reflect_::as_reflect(&self.#members)), )*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #( #indices => #option_::Some(#reflect_::as_reflect_mut(&mut self.#members)), )*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}
