use alloc::boxed::Box;
use core::any::TypeId;

use crate::info::{ArrayInfo, EnumInfo, ListInfo, MapInfo, OpaqueInfo};
use crate::info::{OptionalInfo, SetInfo, StructInfo, Type};
use crate::{Reflect, ReflectKind};

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information, split by [`ReflectKind`].
///
/// Obtained through [`Typed::type_info`] when the type is known statically,
/// or [`DynamicTyped::reflect_type_info`] from a `dyn Reflect`.
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`DynamicTyped::reflect_type_info`]: crate::info::DynamicTyped::reflect_type_info
#[derive(Clone, Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    Array(ArrayInfo),
    List(ListInfo),
    Set(SetInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Enum(EnumInfo),
    Scalar(OpaqueInfo),
    Document(OpaqueInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Converts to the kind-specific information.
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

macro_rules! dispatch {
    ($self:ident, $info:ident => $expr:expr) => {
        match $self {
            Self::Struct($info) => $expr,
            Self::Array($info) => $expr,
            Self::List($info) => $expr,
            Self::Set($info) => $expr,
            Self::Map($info) => $expr,
            Self::Optional($info) => $expr,
            Self::Enum($info) => $expr,
            Self::Scalar($info) | Self::Document($info) | Self::Opaque($info) => $expr,
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_set: Set => SetInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);

    /// Returns the [`ReflectKind`] of the described type.
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

    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        dispatch!(self, info => info.ty())
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the generic arguments of aggregates, see
    /// [`NamedField::generic_args`](crate::info::NamedField::generic_args).
    pub fn generic_args(&self) -> &[Type] {
        match self {
            Self::Array(info) => info.generic_args(),
            Self::List(info) => info.generic_args(),
            Self::Set(info) => info.generic_args(),
            Self::Optional(info) => info.generic_args(),
            Self::Map(info) => info.generic_args(),
            _ => &[],
        }
    }

    /// Creates a fresh instance of the described type, if a constructor is
    /// known.
    pub fn create_default(&self) -> Option<Box<dyn Reflect>> {
        dispatch!(self, info => info.create_default())
    }
}
