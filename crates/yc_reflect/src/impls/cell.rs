//! Containers for static storage of type information.
//!
//! Usually used to implement [`Typed`](crate::info::Typed).
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`], for non-generic types.
//! - [`GenericTypeInfoCell`]: a [`TypeIdMap`] behind a [`RwLock`]. A
//!   `static` inside a generic function is shared by every instantiation,
//!   so the entries are keyed by [`TypeId`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use yc_utils::TypeIdMap;

use crate::info::TypeInfo;

/// Container for static storage of non-generic type information.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, computing it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for static storage of generic type information.
///
/// ```
/// use yc_reflect::impls::GenericTypeInfoCell;
/// use yc_reflect::info::{OpaqueInfo, TypeInfo, Typed};
///
/// struct Tagged<T>(T);
///
/// impl<T: 'static> Typed for Tagged<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(<Tagged<u8>>::type_info().ty().is::<Tagged<u8>>());
/// assert!(<Tagged<i8>>::type_info().ty().is::<Tagged<i8>>());
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, computing it with `f` on first
    /// access.
    ///
    /// `f` runs without holding the lock, so it may itself request other
    /// type infos. If two threads race, the first insert wins and the other
    /// value is dropped.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = map.get(&type_id) {
            return *existing;
        }
        let leaked: &'static TypeInfo = Box::leak(Box::new(value));
        map.insert(type_id, leaked);
        leaked
    }
}

impl Default for GenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}
