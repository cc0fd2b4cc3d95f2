use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path::fp::ResultFP;

/// Generates the `Reflect` implementation, `kind` being the variant of
/// `ReflectRef` / `ReflectMut` the type belongs to.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, kind: TokenStream) -> TokenStream {
    let yc_reflect_path = meta.yc_reflect_path();
    let reflect_ = crate::path::reflect_(yc_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(yc_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(yc_reflect_path);
    let exports_ = crate::path::macro_exports_(yc_reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }

            #[inline]
            fn into_reflect(
                self: #exports_::alloc_utils::Box<Self>,
            ) -> #exports_::alloc_utils::Box<dyn #reflect_> {
                self
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#kind(self)
            }

            fn set(
                &mut self,
                value: #exports_::alloc_utils::Box<dyn #reflect_>,
            ) -> #ResultFP<(), #exports_::alloc_utils::Box<dyn #reflect_>> {
                *self = <dyn #reflect_>::take::<Self>(value)?;
                #ResultFP::Ok(())
            }
        }
    }
}
