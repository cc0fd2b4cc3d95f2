use alloc::boxed::Box;
use core::any::Any;

use crate::Reflect;
use crate::info::{Type, impl_common_fn};

/// Information of a type without inner structure: scalars, documents and
/// opaque types.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl OpaqueInfo {
    impl_common_fn!();

    pub fn new<T: Any>() -> Self {
        Self {
            ty: Type::of::<T>(),
            ctor: None,
        }
    }
}
