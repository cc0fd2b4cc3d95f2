use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectMeta;
use crate::path::fp::{DisplayFP, FromStrFP, ResultFP};

/// Implements reflection for a `#[reflect(opaque)]` type.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let typed_trait_tokens = impl_trait_typed(meta, meta.to_opaque_info_tokens(quote!(Opaque)));
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Opaque));
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #auto_register_tokens

        #typed_trait_tokens

        #reflect_trait_tokens
    }
}

/// Implements reflection for a `#[reflect(scalar)]` type, stored as its
/// `Display` text and read back with `FromStr`.
pub(crate) fn impl_scalar(meta: &ReflectMeta) -> TokenStream {
    let typed_trait_tokens = impl_trait_typed(meta, meta.to_opaque_info_tokens(quote!(Scalar)));
    let scalar_trait_tokens = impl_trait_scalar(meta);
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Scalar));
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #auto_register_tokens

        #typed_trait_tokens

        #scalar_trait_tokens

        #reflect_trait_tokens
    }
}

fn impl_trait_scalar(meta: &ReflectMeta) -> TokenStream {
    let yc_reflect_path = meta.yc_reflect_path();
    let scalar_ = crate::path::scalar_(yc_reflect_path);
    let scalar_error_ = crate::path::scalar_error_(yc_reflect_path);
    let parse_text_ = crate::path::parse_text_(yc_reflect_path);
    let typed_ = crate::path::typed_(yc_reflect_path);
    let exports_ = crate::path::macro_exports_(yc_reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();
    let where_clause = if where_clause.is_empty() {
        quote!(where Self: #DisplayFP + #FromStrFP)
    } else {
        quote!(#where_clause Self: #DisplayFP + #FromStrFP)
    };

    quote! {
        impl #impl_generics #scalar_ for #ident #ty_generics #where_clause {
            fn to_scalar(&self) -> #exports_::DocValue {
                #exports_::DocValue::from(#exports_::alloc_utils::ToString::to_string(self))
            }

            fn assign_scalar(
                &mut self,
                value: &#exports_::DocValue,
            ) -> #ResultFP<(), #scalar_error_> {
                let expected = <Self as #typed_>::type_info().type_path();
                *self = #parse_text_::<Self>(value, expected)?;
                #ResultFP::Ok(())
            }
        }
    }
}
