use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use yc_doc::DocValue;

use crate::Reflect;
use crate::convert::ConvertError;
use crate::info::Type;

/// Turns a value into a document node.
pub type SerializeFn = dyn Fn(&dyn Reflect) -> Result<DocValue, ConvertError> + Send + Sync;
/// Builds a value from a document node.
pub type DeserializeFn = dyn Fn(&DocValue) -> Result<Box<dyn Reflect>, ConvertError> + Send + Sync;
/// Turns a value into a mapping key.
pub type KeySerializeFn = dyn Fn(&dyn Reflect) -> Result<String, ConvertError> + Send + Sync;
/// Builds a value from a mapping key.
pub type KeyDeserializeFn = dyn Fn(&str) -> Result<Box<dyn Reflect>, ConvertError> + Send + Sync;

// -----------------------------------------------------------------------------
// ValueConverter

/// A registered pair of functions between a type and a document node.
pub struct ValueConverter {
    ty: Type,
    serialize: Box<SerializeFn>,
    deserialize: Box<DeserializeFn>,
}

impl ValueConverter {
    /// Wraps typed functions. The erased serializer rejects values of any
    /// other type with [`ConvertError::MismatchedTypes`].
    pub fn new<T: Reflect>(
        serialize: impl Fn(&T) -> Result<DocValue, ConvertError> + Send + Sync + 'static,
        deserialize: impl Fn(&DocValue) -> Result<T, ConvertError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            serialize: Box::new(move |value: &dyn Reflect| serialize(downcast::<T>(value)?)),
            deserialize: Box::new(move |doc: &DocValue| {
                deserialize(doc).map(|v| Box::new(v) as Box<dyn Reflect>)
            }),
        }
    }

    /// Returns the subject type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn serializer(&self) -> &SerializeFn {
        &*self.serialize
    }

    #[inline]
    pub fn deserializer(&self) -> &DeserializeFn {
        &*self.deserialize
    }

    #[inline]
    pub fn serialize(&self, value: &dyn Reflect) -> Result<DocValue, ConvertError> {
        (self.serialize)(value)
    }

    #[inline]
    pub fn deserialize(&self, doc: &DocValue) -> Result<Box<dyn Reflect>, ConvertError> {
        (self.deserialize)(doc)
    }
}

impl fmt::Debug for ValueConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueConverter").field("ty", &self.ty).finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// KeyConverter

/// A registered pair of functions between a type and a mapping key.
pub struct KeyConverter {
    ty: Type,
    serialize: Box<KeySerializeFn>,
    deserialize: Box<KeyDeserializeFn>,
}

impl KeyConverter {
    pub fn new<T: Reflect>(
        serialize: impl Fn(&T) -> String + Send + Sync + 'static,
        deserialize: impl Fn(&str) -> Result<T, ConvertError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            serialize: Box::new(move |value: &dyn Reflect| Ok(serialize(downcast::<T>(value)?))),
            deserialize: Box::new(move |key: &str| {
                deserialize(key).map(|v| Box::new(v) as Box<dyn Reflect>)
            }),
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn serializer(&self) -> &KeySerializeFn {
        &*self.serialize
    }

    #[inline]
    pub fn deserializer(&self) -> &KeyDeserializeFn {
        &*self.deserialize
    }

    #[inline]
    pub fn serialize(&self, value: &dyn Reflect) -> Result<String, ConvertError> {
        (self.serialize)(value)
    }

    #[inline]
    pub fn deserialize(&self, key: &str) -> Result<Box<dyn Reflect>, ConvertError> {
        (self.deserialize)(key)
    }
}

impl fmt::Debug for KeyConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyConverter").field("ty", &self.ty).finish_non_exhaustive()
    }
}

fn downcast<T: Reflect>(value: &dyn Reflect) -> Result<&T, ConvertError> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| ConvertError::MismatchedTypes {
            expected: core::any::type_name::<T>(),
            found: value.reflect_type_path(),
        })
}
