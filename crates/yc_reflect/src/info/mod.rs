//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId` together with the type path.
//! - [`Typed`]: static access to the [`TypeInfo`] of a type.
//! - [`DynamicTyped`]: dynamic dispatch for [`Typed`].
//! - [`TypeInfo`]: the per-kind information, one of:
//!     - [`StructInfo`]: ordered [`NamedField`] descriptors.
//!     - [`ArrayInfo`], [`ListInfo`], [`SetInfo`]: the item type.
//!     - [`MapInfo`]: the key and value types.
//!     - [`OptionalInfo`]: the wrapped type.
//!     - [`EnumInfo`]: the variant names.
//!     - [`OpaqueInfo`]: scalars, documents and opaque types.
//! - [`describe`]: the field descriptors of a struct type.
//!
//! Every info may carry a constructor producing a default instance, used
//! when a value has to be built from a document instead of applied in place.

// -----------------------------------------------------------------------------
// Modules

mod collection_info;
mod enum_info;
mod field_info;
mod opaque_info;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use collection_info::{ArrayInfo, ListInfo, MapInfo, OptionalInfo, SetInfo};
pub use enum_info::EnumInfo;
pub use field_info::NamedField;
pub use opaque_info::OpaqueInfo;
pub use struct_info::{StructInfo, describe};
pub use ty::Type;
pub use type_info::TypeInfo;
pub use typed::{DynamicTyped, Typed};

pub(crate) use ty::impl_common_fn;
