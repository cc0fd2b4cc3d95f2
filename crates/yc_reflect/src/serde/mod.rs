//! Integration with any `serde` data format.
//!
//! - [`ReflectSerializer`]: serializes a `&dyn Reflect` through the
//!   [`DocumentConverter`](crate::convert::DocumentConverter).
//! - [`ReflectDeserializer`]: a [`DeserializeSeed`] building a value of a
//!   known [`TypeInfo`](crate::info::TypeInfo).
//!
//! Both go through the document tree, so they produce exactly what the
//! YAML path produces, just in another syntax.
//!
//! [`DeserializeSeed`]: serde_core::de::DeserializeSeed

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::ReflectDeserializer;
pub use ser::ReflectSerializer;
