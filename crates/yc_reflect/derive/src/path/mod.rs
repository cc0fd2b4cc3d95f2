//! Paths of the `yc_reflect` items used by the generated code, kept in one
//! place so that moving an item only touches this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Returns the path under which `yc_reflect` is reachable from the crate
/// being expanded.
///
/// 1. For crates that depend on `yc_reflect`, `::yc_reflect` is returned.
/// 2. For crates that depend on `yconf`, `::yconf::reflect` is returned.
/// 3. Otherwise `::yc_reflect` is returned, which may be incorrect.
///
/// Reading the manifest is comparatively costly, so the result is passed
/// around instead of being looked up again.
pub(crate) fn yc_reflect() -> syn::Path {
    yc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("yc_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod info;
mod ops;

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use info::*;
pub(crate) use ops::*;

#[inline(always)]
pub(crate) fn macro_exports_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn reflect_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn reflect_ref_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn reflect_mut_(yc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #yc_reflect_path::ReflectMut
    }
}
