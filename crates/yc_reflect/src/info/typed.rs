use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented by `#[derive(Reflect)]`. A manual implementation stores the
/// info in a [`NonGenericTypeInfoCell`] or, for generic types, a
/// [`GenericTypeInfoCell`]:
///
/// ```
/// use yc_reflect::impls::NonGenericTypeInfoCell;
/// use yc_reflect::info::{OpaqueInfo, TypeInfo, Typed};
///
/// struct Handle(u32);
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert_eq!(Handle::type_info().ty().ident(), "Handle");
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`], implemented for every [`Typed`] type.
pub trait DynamicTyped {
    /// Returns the [`TypeInfo`] of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
