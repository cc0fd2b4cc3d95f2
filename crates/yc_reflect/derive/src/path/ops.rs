use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn struct_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::ops::Struct
    }
}

#[inline(always)]
pub(crate) fn enum_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::ops::Enum
    }
}

#[inline(always)]
pub(crate) fn scalar_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::ops::Scalar
    }
}

#[inline(always)]
pub(crate) fn scalar_error_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::ops::ScalarError
    }
}

#[inline(always)]
pub(crate) fn parse_text_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::ops::parse_text
    }
}
