use alloc::boxed::Box;
use core::any::Any;

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed, impl_common_fn};

// -----------------------------------------------------------------------------
// Single item

macro_rules! impl_item_fn {
    () => {
        /// Returns the item [`Type`].
        #[inline]
        pub const fn item_ty(&self) -> &Type {
            &self.item[0]
        }

        /// Returns the item [`TypeInfo`].
        #[inline]
        pub fn item_info(&self) -> &'static TypeInfo {
            (self.item_info)()
        }

        /// Returns the generic arguments: the item type.
        #[inline]
        pub fn generic_args(&self) -> &[Type] {
            &self.item
        }
    };
}

/// Information of a fixed-size array, e.g. `[u8; 4]`.
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item: [Type; 1],
    item_info: fn() -> &'static TypeInfo,
    capacity: usize,
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl ArrayInfo {
    impl_common_fn!();
    impl_item_fn!();

    pub fn new<T: Any, Item: Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<T>(),
            item: [Type::of::<Item>()],
            item_info: Item::type_info,
            capacity,
            ctor: None,
        }
    }

    /// Returns the fixed length of the array.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Information of an ordered sequence that keeps duplicates, e.g. `Vec<T>`.
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item: [Type; 1],
    item_info: fn() -> &'static TypeInfo,
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl ListInfo {
    impl_common_fn!();
    impl_item_fn!();

    pub fn new<T: Any, Item: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            item: [Type::of::<Item>()],
            item_info: Item::type_info,
            ctor: None,
        }
    }
}

/// Information of a collection of unique values, e.g. `BTreeSet<T>`.
#[derive(Clone, Debug)]
pub struct SetInfo {
    ty: Type,
    item: [Type; 1],
    item_info: fn() -> &'static TypeInfo,
    ordered: bool,
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl SetInfo {
    impl_common_fn!();
    impl_item_fn!();

    /// `ordered` tells whether the iteration order of the set is
    /// deterministic (sorted or insertion ordered).
    pub fn new<T: Any, Item: Typed>(ordered: bool) -> Self {
        Self {
            ty: Type::of::<T>(),
            item: [Type::of::<Item>()],
            item_info: Item::type_info,
            ordered,
            ctor: None,
        }
    }

    #[inline]
    pub const fn is_ordered(&self) -> bool {
        self.ordered
    }
}

/// Information of an optional value, i.e. `Option<T>`.
#[derive(Clone, Debug)]
pub struct OptionalInfo {
    ty: Type,
    item: [Type; 1],
    item_info: fn() -> &'static TypeInfo,
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl OptionalInfo {
    impl_common_fn!();
    impl_item_fn!();

    pub fn new<T: Any, Item: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            item: [Type::of::<Item>()],
            item_info: Item::type_info,
            ctor: None,
        }
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Information of a key-value collection, e.g. `HashMap<K, V>`.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    // [key, value]
    args: [Type; 2],
    key_info: fn() -> &'static TypeInfo,
    value_info: fn() -> &'static TypeInfo,
    ordered: bool,
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl MapInfo {
    impl_common_fn!();

    /// `ordered` tells whether the iteration order of the map is
    /// deterministic (sorted or insertion ordered).
    pub fn new<T: Any, K: Typed, V: Typed>(ordered: bool) -> Self {
        Self {
            ty: Type::of::<T>(),
            args: [Type::of::<K>(), Type::of::<V>()],
            key_info: K::type_info,
            value_info: V::type_info,
            ordered,
            ctor: None,
        }
    }

    #[inline]
    pub const fn key_ty(&self) -> &Type {
        &self.args[0]
    }

    #[inline]
    pub const fn value_ty(&self) -> &Type {
        &self.args[1]
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    /// Returns the generic arguments: the key and value types.
    #[inline]
    pub fn generic_args(&self) -> &[Type] {
        &self.args
    }

    #[inline]
    pub const fn is_ordered(&self) -> bool {
        self.ordered
    }
}
