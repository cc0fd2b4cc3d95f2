use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use indexmap::IndexSet;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{SetInfo, TypeInfo, Typed};
use crate::ops::Set;
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_set {
    ($ty:ident < T $(, $s:ident)? > where $($bound:path),+ ; ordered = $ordered:literal) => {
        impl<T, $($s)?> Typed for $ty<T $(, $s)?>
        where
            T: Reflect + Typed $(+ $bound)+,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Set(SetInfo::new::<Self, T>($ordered).with_default::<Self>())
                })
            }
        }

        impl<T, $($s)?> Reflect for $ty<T $(, $s)?>
        where
            T: Reflect + Typed $(+ $bound)+,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            impl_reflect_cast_fn!(Set);
        }

        impl<T, $($s)?> Set for $ty<T $(, $s)?>
        where
            T: Reflect + Typed $(+ $bound)+,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty<T $(, $s)?>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(<$ty<T $(, $s)?>>::iter(self).map(Reflect::as_reflect))
            }

            fn insert(&mut self, value: Box<dyn Reflect>) -> Result<bool, Box<dyn Reflect>> {
                Ok(<$ty<T $(, $s)?>>::insert(self, value.take::<T>()?))
            }

            #[inline]
            fn clear(&mut self) {
                <$ty<T $(, $s)?>>::clear(self);
            }
        }
    };
}

impl_set!(BTreeSet<T> where Ord; ordered = true);
impl_set!(IndexSet<T, S> where Hash, Eq; ordered = true);
impl_set!(HashSet<T, S> where Hash, Eq; ordered = false);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeSet;
    use std::collections::HashSet;

    use crate::info::Typed;
    use crate::ops::Set;

    #[test]
    fn insert_reports_duplicates() {
        let mut set = BTreeSet::<u8>::new();
        assert_eq!(Set::insert(&mut set, Box::new(3_u8)).ok(), Some(true));
        assert_eq!(Set::insert(&mut set, Box::new(3_u8)).ok(), Some(false));
        assert!(Set::insert(&mut set, Box::new(3_i8)).is_err());
        assert_eq!(Set::len(&set), 1);
    }

    #[test]
    fn ordering_is_recorded() {
        assert!(BTreeSet::<u8>::type_info().as_set().unwrap().is_ordered());
        assert!(!HashSet::<u8>::type_info().as_set().unwrap().is_ordered());
    }
}
