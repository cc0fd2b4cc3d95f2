use crate::Reflect;
use crate::info::{StructInfo, TypeInfo};

/// Access to the fields of a struct, by name or by declaration index.
///
/// Fields marked `#[reflect(skip)]` keep their index but are not
/// accessible: both accessors return `None` for them.
///
/// ```
/// use yc_reflect::{Reflect, ops::Struct};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut p = Point { x: 1, y: 2 };
/// *p.field_mut("y").unwrap().downcast_mut::<i32>().unwrap() = 5;
/// assert_eq!(p.field_at(1).unwrap().downcast_ref::<i32>(), Some(&5));
/// assert_eq!(p.field_len(), 2);
/// ```
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of declared fields, skipped ones included.
    fn field_len(&self) -> usize;
}

impl<'a> dyn Struct + 'a {
    /// Returns the field descriptors of the underlying type, `None` if its
    /// [`TypeInfo`] does not describe a struct.
    #[inline]
    pub fn struct_info(&self) -> Option<&'static StructInfo> {
        match self.reflect_type_info() {
            TypeInfo::Struct(info) => Some(info),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::Reflect;
    use crate::ops::Struct;

    #[derive(Reflect, Default)]
    struct Account {
        name: String,
        #[reflect(skip)]
        cache: u8,
        level: u32,
    }

    #[test]
    fn derived_accessors_by_name_and_index() {
        let mut account = Account {
            name: String::from("a"),
            cache: 9,
            level: 3,
        };
        assert_eq!(account.field("level").unwrap().downcast_ref::<u32>(), Some(&3));
        assert_eq!(account.field_at(0).unwrap().downcast_ref::<String>().unwrap(), "a");
        *account.field_at_mut(2).unwrap().downcast_mut::<u32>().unwrap() = 7;
        assert_eq!(account.level, 7);
        assert!(account.field_mut("name").is_some());
        assert!(account.field("missing").is_none());
    }

    #[test]
    fn skipped_field_keeps_index_but_is_hidden() {
        let account = Account::default();
        assert!(account.field("cache").is_none());
        assert!(account.field_at(1).is_none());
        assert!(account.field_at(3).is_none());
        assert_eq!(account.field_len(), 3);
        assert_eq!(account.cache, 0);
    }
}
