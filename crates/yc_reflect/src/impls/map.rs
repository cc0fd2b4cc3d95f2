use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_map {
    ($ty:ident < K, V $(, $s:ident)? > where $($bound:path),+ ; ordered = $ordered:literal) => {
        impl<K, V, $($s)?> Typed for $ty<K, V $(, $s)?>
        where
            K: Reflect + Typed $(+ $bound)+,
            V: Reflect + Typed,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, K, V>($ordered).with_default::<Self>())
                })
            }
        }

        impl<K, V, $($s)?> Reflect for $ty<K, V $(, $s)?>
        where
            K: Reflect + Typed $(+ $bound)+,
            V: Reflect + Typed,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            impl_reflect_cast_fn!(Map);
        }

        impl<K, V, $($s)?> Map for $ty<K, V $(, $s)?>
        where
            K: Reflect + Typed $(+ $bound)+,
            V: Reflect + Typed,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty<K, V $(, $s)?>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    <$ty<K, V $(, $s)?>>::iter(self)
                        .map(|(k, v)| (k.as_reflect(), v.as_reflect())),
                )
            }

            fn insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
                if !key.is::<K>() || !value.is::<V>() {
                    return Err((key, value));
                }
                match (key.take::<K>(), value.take::<V>()) {
                    (Ok(key), Ok(value)) => {
                        <$ty<K, V $(, $s)?>>::insert(self, key, value);
                        Ok(())
                    }
                    _ => unreachable!("the type ids were checked before taking"),
                }
            }

            #[inline]
            fn clear(&mut self) {
                <$ty<K, V $(, $s)?>>::clear(self);
            }
        }
    };
}

impl_map!(BTreeMap<K, V> where Ord; ordered = true);
impl_map!(IndexMap<K, V, S> where Hash, Eq; ordered = true);
impl_map!(HashMap<K, V, S> where Hash, Eq; ordered = false);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::info::{Type, Typed};
    use crate::ops::Map;

    #[test]
    fn insert_checks_both_types() {
        let mut map = BTreeMap::<String, u32>::new();
        Map::insert(&mut map, Box::new(String::from("a")), Box::new(1_u32)).unwrap();
        let (k, v) = Map::insert(&mut map, Box::new(String::from("b")), Box::new(1_i64)).unwrap_err();
        assert!(k.is::<String>() && v.is::<i64>());
        assert_eq!(Map::len(&map), 1);
    }

    #[test]
    fn key_and_value_types_are_exposed() {
        let info = BTreeMap::<String, u32>::type_info();
        assert_eq!(info.generic_args(), [Type::of::<String>(), Type::of::<u32>()]);
    }
}
