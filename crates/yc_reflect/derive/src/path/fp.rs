//! Fully qualified paths of `core` items, usable directly inside `quote!`.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

macro_rules! define_fp {
    ($($name:ident => $($seg:ident)::+,)*) => {$(
        pub(crate) struct $name;

        impl ToTokens for $name {
            #[inline]
            fn to_tokens(&self, tokens: &mut TokenStream) {
                quote!($(::$seg)+).to_tokens(tokens);
            }
        }
    )*};
}

define_fp! {
    AnyFP => core::any::Any,
    SendFP => core::marker::Send,
    SyncFP => core::marker::Sync,
    OptionFP => core::option::Option,
    ResultFP => core::result::Result,
    DisplayFP => core::fmt::Display,
    FromStrFP => core::str::FromStr,
}
