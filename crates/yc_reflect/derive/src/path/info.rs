use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn typed_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn struct_info_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn named_field_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::info::NamedField
    }
}

#[inline(always)]
pub(crate) fn enum_info_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::info::EnumInfo
    }
}

#[inline(always)]
pub(crate) fn opaque_info_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::info::OpaqueInfo
    }
}
