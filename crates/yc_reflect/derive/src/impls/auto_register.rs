use crate::derive_data::ReflectMeta;

/// Generates the `inventory` submission of `#[reflect(convert)]` and
/// `#[reflect(key_convert)]`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> proc_macro2::TokenStream {
    use quote::quote;

    let attrs = meta.attrs();
    if attrs.convert.is_none() && attrs.key_convert.is_none() {
        return crate::utils::empty();
    }
    // The concrete instantiations of a generic type are unknown here.
    if meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let yc_reflect_path = meta.yc_reflect_path();
    let auto_register_ = crate::path::auto_register_(yc_reflect_path);
    let ident = meta.ident();

    let convert = attrs
        .convert
        .map(|_| quote!(registry.register_convert::<#ident>();));
    let key_convert = attrs
        .key_convert
        .map(|_| quote!(registry.register_key_convert::<#ident>();));

    quote! {
        fn __register(registry: &mut #auto_register_::ConverterRegistry) {
            #convert
            #key_convert
        }

        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegisterFunc(__register)
        }
    }
}

/// Generates nothing: the `auto_register` feature is disabled.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
