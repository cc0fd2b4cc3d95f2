//! Items referenced by the code `#[derive(Reflect)]` generates.
//!
//! The generated code must not assume the invoking crate links `alloc` or
//! `yc_doc`, so everything goes through this module.

pub mod alloc_utils {
    pub use alloc::boxed::Box;
    pub use alloc::string::ToString;
}

pub use yc_doc::DocValue;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use crate::registry::{AutoRegisterFunc, ConverterRegistry};
    pub use inventory;
}
