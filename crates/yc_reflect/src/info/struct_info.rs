use alloc::boxed::Box;
use core::any::Any;

use crate::info::{NamedField, Type, TypeInfo, Typed, impl_common_fn};
use crate::Reflect;

/// The ordered field descriptors of a struct.
///
/// # Examples
///
/// ```
/// use yc_reflect::{Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Spawn {
///     world: String,
///     #[reflect(rename = "y-level")]
///     height: i32,
/// }
///
/// let info = Spawn::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field_by_key("y-level").unwrap().name(), "height");
/// assert!(info.create_default().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl StructInfo {
    impl_common_fn!();

    /// Creates a new [`StructInfo`]; the field order is the input order.
    pub fn new<T: Any>(fields: &[NamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            ctor: None,
        }
    }

    /// Returns the field named `name`.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the field stored under the document key `key`.
    pub fn field_by_key(&self, key: &str) -> Option<&NamedField> {
        self.fields.iter().find(|f| f.key() == key)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns the index of the field named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Returns the fields in declaration order, skipped ones included.
    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}

/// Returns the field descriptors of the struct type `T`, or `None` when `T`
/// is not a struct.
///
/// The descriptors are computed once and cached for the life of the process.
///
/// ```
/// use yc_reflect::{Reflect, info::describe};
///
/// #[derive(Reflect, Default)]
/// struct Limits {
///     max_players: u32,
///     #[reflect(skip)]
///     cache: Vec<u8>,
///     #[reflect(ignore)]
///     scratch: u8,
/// }
///
/// let info = describe::<Limits>().unwrap();
/// let keys: Vec<_> = info.iter().map(|f| (f.key(), f.is_skipped())).collect();
/// assert_eq!(keys, [("max-players", false), ("cache", true)]);
/// assert!(describe::<u32>().is_none());
/// ```
pub fn describe<T: Typed>() -> Option<&'static StructInfo> {
    match T::type_info() {
        TypeInfo::Struct(info) => Some(info),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::marker::PhantomData;

    use crate::Reflect;
    use crate::info::{Typed, describe};
    use crate::ops::Struct;

    #[derive(Reflect, Default)]
    #[reflect(default, rename_all = "camelCase")]
    struct Camel {
        max_players: u32,
        #[reflect(rename = "MOTD")]
        message_of_the_day: String,
        #[reflect(comment = "first", comment = "second")]
        r#type: u8,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Wrapper<T> {
        inner: Vec<T>,
        #[reflect(skip)]
        marker: PhantomData<T>,
    }

    #[test]
    fn keys_follow_rename_rules() {
        let info = describe::<Camel>().unwrap();
        let keys: Vec<_> = info.iter().map(|f| f.key()).collect();
        assert_eq!(keys, ["maxPlayers", "MOTD", "type"]);
        assert_eq!(info.field("type").unwrap().comments(), ["first", "second"]);
    }

    #[test]
    fn generic_struct_has_info_per_instantiation() {
        let a = describe::<Wrapper<u8>>().unwrap();
        let b = describe::<Wrapper<String>>().unwrap();
        assert!(a.field_at(0).unwrap().ty().is::<Vec<u8>>());
        assert!(b.field_at(0).unwrap().ty().is::<Vec<String>>());
        assert_eq!(a.field_at(0).unwrap().generic_args()[0], crate::info::Type::of::<u8>());
        assert!(a.field_at(1).unwrap().is_skipped());
    }

    #[test]
    fn skipped_fields_are_not_accessible() {
        let mut value = Wrapper::<u8>::default();
        assert_eq!(value.field_len(), 2);
        assert!(value.field_at(1).is_none());
        assert!(value.field_mut("marker").is_none());
        assert!(value.field_mut("inner").is_some());
    }

    #[test]
    fn default_constructs() {
        let boxed = Camel::type_info().create_default().unwrap();
        assert!(boxed.is::<Camel>());
        assert!(Wrapper::<u8>::type_info().create_default().is_some());
    }
}
