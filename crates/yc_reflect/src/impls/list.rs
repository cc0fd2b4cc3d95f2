use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_list {
    ($ty:ident, $access:ty, $push:ident) => {
        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(ListInfo::new::<Self, T>().with_default::<Self>())
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            impl_reflect_cast_fn!(List);
        }

        impl<T: Reflect + Typed> List for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                <$access>::get(self, index).map(Reflect::as_reflect)
            }

            #[inline]
            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                <$access>::get_mut(self, index).map(Reflect::as_reflect_mut)
            }

            fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                <$ty<T>>::$push(self, value.take::<T>()?);
                Ok(())
            }

            #[inline]
            fn clear(&mut self) {
                <$ty<T>>::clear(self);
            }
        }
    };
}

// `Vec` reaches `get` through its slice.
impl_list!(Vec, [T], push);
impl_list!(VecDeque, VecDeque<T>, push_back);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;

    use crate::info::{Type, Typed};
    use crate::ops::List;

    #[test]
    fn push_keeps_duplicates_in_order() {
        let mut list = VecDeque::from([1_i32]);
        list.push(Box::new(1_i32)).unwrap();
        list.push(Box::new(2_i32)).unwrap();
        assert!(List::push(&mut list, Box::new(2_u8)).is_err());
        assert_eq!(list, [1, 1, 2]);
    }

    #[test]
    fn item_type_is_exposed() {
        let info = <vec::Vec<u32>>::type_info().as_list().unwrap();
        assert_eq!(info.item_ty(), &Type::of::<u32>());
    }
}
