use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use yc_doc::DocValue;

use crate::info::DynamicTyped;
use crate::ops::{Array, Enum, List, Map, Optional, Scalar, Set, Struct};

// -----------------------------------------------------------------------------
// ReflectKind

/// The structural category of a reflected type.
///
/// It decides how the converter maps a value onto the document tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A struct with named fields, walked field by field.
    Struct,
    /// A fixed-size array.
    Array,
    /// An ordered sequence that keeps duplicates.
    List,
    /// A collection of unique values.
    Set,
    /// A key-value collection.
    Map,
    /// A value that may be absent.
    Optional,
    /// A fieldless enum, represented by its variant name.
    Enum,
    /// A leaf value with a direct scalar form.
    Scalar,
    /// A [`DocValue`] stored as-is.
    Document,
    /// A value only a registered converter can handle.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An immutable view of a reflected value, split by [`ReflectKind`].
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Array(&'a dyn Array),
    List(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Optional(&'a dyn Optional),
    Enum(&'a dyn Enum),
    Scalar(&'a dyn Scalar),
    Document(&'a DocValue),
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a reflected value, split by [`ReflectKind`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Array(&'a mut dyn Array),
    List(&'a mut dyn List),
    Set(&'a mut dyn Set),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Enum(&'a mut dyn Enum),
    Scalar(&'a mut dyn Scalar),
    Document(&'a mut DocValue),
    Opaque(&'a mut dyn Reflect),
}

macro_rules! impl_kind_fn {
    ($name:ident) => {
        impl $name<'_> {
            /// Returns the kind of the viewed value.
            pub const fn kind(&self) -> ReflectKind {
                match self {
                    Self::Struct(_) => ReflectKind::Struct,
                    Self::Array(_) => ReflectKind::Array,
                    Self::List(_) => ReflectKind::List,
                    Self::Set(_) => ReflectKind::Set,
                    Self::Map(_) => ReflectKind::Map,
                    Self::Optional(_) => ReflectKind::Optional,
                    Self::Enum(_) => ReflectKind::Enum,
                    Self::Scalar(_) => ReflectKind::Scalar,
                    Self::Document(_) => ReflectKind::Document,
                    Self::Opaque(_) => ReflectKind::Opaque,
                }
            }
        }
    };
}

impl_kind_fn!(ReflectRef);
impl_kind_fn!(ReflectMut);

// -----------------------------------------------------------------------------
// Reflect

/// The dynamic interface over every persistable type.
///
/// Usually implemented through `#[derive(Reflect)]`; the implementations of
/// the primitive and collection types live in [`impls`](crate::impls).
///
/// `Reflect` requires [`Typed`](crate::info::Typed) through
/// [`DynamicTyped`], so the static type information of any value can be
/// reached from a `&dyn Reflect`.
pub trait Reflect: DynamicTyped + Any + Send + Sync {
    /// Casts to `&dyn Reflect`.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Casts to `&mut dyn Reflect`.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Casts to `Box<dyn Reflect>`.
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Returns an immutable view split by kind.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable view split by kind.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Replaces `self` with `value` if both have the same type, otherwise
    /// hands `value` back.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the [type path](crate::info::Type::path) of the underlying type.
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }

    /// Returns the kind of the underlying type.
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_ref().kind()
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts by reference.
    ///
    /// ```
    /// use yc_reflect::Reflect;
    ///
    /// let value: &dyn Reflect = &7_u16;
    /// assert_eq!(value.downcast_ref::<u16>(), Some(&7));
    /// assert!(value.downcast_ref::<u32>().is_none());
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Takes the value out of the box if it is of type `T`, otherwise
    /// returns the box unchanged.
    ///
    /// ```
    /// use yc_reflect::Reflect;
    ///
    /// let boxed: Box<dyn Reflect> = Box::new(String::from("a"));
    /// let boxed = boxed.take::<u8>().unwrap_err();
    /// assert_eq!(boxed.take::<String>().unwrap(), "a");
    /// ```
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("the type id was checked before downcasting"),
        }
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// impl_reflect_cast_fn

/// Implements every required method of [`Reflect`] for a sized type whose
/// [`ReflectRef`] variant is `$kind`.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        #[inline]
        fn into_reflect(
            self: ::alloc::boxed::Box<Self>,
        ) -> ::alloc::boxed::Box<dyn $crate::Reflect> {
            self
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
            $crate::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ReflectMut<'_> {
            $crate::ReflectMut::$kind(self)
        }

        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = <dyn $crate::Reflect>::take::<Self>(value)?;
            Ok(())
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::{Reflect, ReflectKind};

    #[test]
    fn set_replaces_same_type_only() {
        let mut value = vec![1_u8, 2];
        let target: &mut dyn Reflect = &mut value;
        assert!(target.set(Box::new(vec![3_u8])).is_ok());
        let back = target.set(Box::new(String::from("x"))).unwrap_err();
        assert!(back.is::<String>());
        assert_eq!(value, [3]);
    }

    #[test]
    fn kind_of_builtin_types() {
        assert_eq!(1_i32.reflect_kind(), ReflectKind::Scalar);
        assert_eq!(Vec::<i32>::new().reflect_kind(), ReflectKind::List);
        assert_eq!(Some(1_u8).reflect_kind(), ReflectKind::Optional);
        assert_eq!([0_u8; 2].reflect_kind(), ReflectKind::Array);
    }
}
