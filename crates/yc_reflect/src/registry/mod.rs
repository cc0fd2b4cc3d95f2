//! The converter registry: type-specific handling of values that are not
//! plain data.
//!
//! ## Menu
//!
//! - [`ConverterRegistry`]: maps a [`TypeId`] to a [`ValueConverter`]
//!   (value <-> document node) and a [`KeyConverter`] (value <-> mapping
//!   key).
//! - [`ConverterRegistryArc`]: a shared, lock-protected registry, with a
//!   process-wide [`global`](ConverterRegistryArc::global) instance.
//! - [`Convert`], [`KeyConvert`]: traits a type implements to be
//!   registered with [`register_convert`](ConverterRegistry::register_convert)
//!   and [`register_key_convert`](ConverterRegistry::register_key_convert).
//!
//! Lookups use the exact [`TypeId`]: the runtime type when serializing,
//! the declared type when deserializing. A miss falls back to structural
//! conversion.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, `#[reflect(convert)]` and
//! `#[reflect(key_convert)]` submit their registration through the
//! [`inventory`] crate; [`ConverterRegistry::auto_register`] runs them.
//! On platforms `inventory` does not support, nothing is collected.
//!
//! [`TypeId`]: core::any::TypeId
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod converter;
mod converter_registry;
mod traits;

// -----------------------------------------------------------------------------
// Exports

pub use converter::{DeserializeFn, KeyConverter, KeyDeserializeFn, KeySerializeFn};
pub use converter::{SerializeFn, ValueConverter};
pub use converter_registry::{ConverterRegistry, ConverterRegistryArc};
pub use traits::{Convert, KeyConvert};

#[cfg(feature = "auto_register")]
pub use converter_registry::AutoRegisterFunc;
