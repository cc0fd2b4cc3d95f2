use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ArrayInfo, TypeInfo, Typed};
use crate::ops::Array;
use crate::reflection::impl_reflect_cast_fn;

impl<T: Reflect + Typed + Default, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(N).with_ctor(|| -> Box<dyn Reflect> {
                Box::new(core::array::from_fn::<T, N, _>(|_| T::default()))
            }))
        })
    }
}

impl<T: Reflect + Typed + Default, const N: usize> Reflect for [T; N] {
    impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed + Default, const N: usize> Array for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(Reflect::as_reflect_mut)
    }
}
