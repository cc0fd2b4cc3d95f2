use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] and its type path.
///
/// Equality and hashing only look at the [`TypeId`].
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    ///
    /// ```
    /// use yc_reflect::info::Type;
    ///
    /// let ty = Type::of::<Vec<u8>>();
    /// assert!(ty.is::<Vec<u8>>());
    /// assert_eq!(ty.ident(), "Vec");
    /// ```
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, e.g. `alloc::vec::Vec<u8>`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the type name without module path and generics.
    pub fn ident(&self) -> &'static str {
        let base = match self.path.find('<') {
            Some(end) => &self.path[..end],
            None => self.path,
        };
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Checks whether this is the type `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the accessors shared by every info struct. The struct must
/// have the fields `ty: Type` and `ctor: Option<fn() -> Box<dyn Reflect>>`.
macro_rules! impl_common_fn {
    () => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.ty
        }

        /// Returns the `TypeId`.
        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.ty.id()
        }

        /// Returns the type path.
        #[inline]
        pub const fn type_path(&self) -> &'static str {
            self.ty.path()
        }

        /// Sets the function used to create a fresh instance.
        #[inline]
        pub fn with_ctor(
            mut self,
            ctor: fn() -> ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Self {
            self.ctor = Some(ctor);
            self
        }

        /// Uses [`Default`] to create fresh instances.
        #[inline]
        pub fn with_default<T: $crate::Reflect + Default>(self) -> Self {
            self.with_ctor(|| -> ::alloc::boxed::Box<dyn $crate::Reflect> {
                ::alloc::boxed::Box::new(T::default())
            })
        }

        /// Creates a fresh instance, if a constructor is known.
        #[inline]
        pub fn create_default(&self) -> Option<::alloc::boxed::Box<dyn $crate::Reflect>> {
            self.ctor.map(|ctor| ctor())
        }
    };
}

pub(crate) use impl_common_fn;

#[cfg(test)]
mod tests {
    use super::Type;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn ident_strips_module_and_generics() {
        assert_eq!(Type::of::<String>().ident(), "String");
        assert_eq!(Type::of::<Vec<Vec<u8>>>().ident(), "Vec");
        assert_eq!(Type::of::<u8>().ident(), "u8");
    }

    #[test]
    fn equality_is_by_id() {
        assert_eq!(Type::of::<u8>(), Type::of::<u8>());
        assert_ne!(Type::of::<u8>(), Type::of::<i8>());
    }
}
