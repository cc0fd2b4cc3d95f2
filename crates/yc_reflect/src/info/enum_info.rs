use alloc::boxed::Box;
use core::any::Any;

use crate::Reflect;
use crate::info::{Type, impl_common_fn};

/// Information of a fieldless enum, stored in documents by variant name.
///
/// ```
/// use yc_reflect::{Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// enum Difficulty {
///     Easy,
///     #[default]
///     Normal,
///     Hard,
/// }
///
/// let info = Difficulty::type_info().as_enum().unwrap();
/// assert_eq!(info.variant_names(), ["Easy", "Normal", "Hard"]);
/// assert_eq!(info.index_of("Hard"), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct EnumInfo {
    ty: Type,
    variants: &'static [&'static str],
    ctor: Option<fn() -> Box<dyn Reflect>>,
}

impl EnumInfo {
    impl_common_fn!();

    pub fn new<T: Any>(variants: &'static [&'static str]) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants,
            ctor: None,
        }
    }

    /// Returns the variant names in declaration order.
    #[inline]
    pub const fn variant_names(&self) -> &'static [&'static str] {
        self.variants
    }

    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&'static str> {
        self.variants.get(index).copied()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| *v == name)
    }

    #[inline]
    pub const fn variant_len(&self) -> usize {
        self.variants.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::Enum;

    #[derive(Reflect, Clone, Copy, PartialEq, Debug)]
    #[reflect(rename_all = "lowercase")]
    enum Mode {
        Survival,
        #[reflect(rename = "CREATIVE")]
        Creative,
    }

    #[test]
    fn variants_and_renames() {
        let info = Mode::type_info().as_enum().unwrap();
        assert_eq!(info.variant_names(), ["survival", "CREATIVE"]);

        let mut mode = Mode::Survival;
        assert_eq!(mode.variant_name(), "survival");
        assert!(mode.set_variant("CREATIVE"));
        assert_eq!(mode, Mode::Creative);
        assert_eq!(mode.variant_index(), 1);
        assert!(!mode.set_variant("Creative"));
        assert_eq!(mode, Mode::Creative);
    }

    #[test]
    fn first_variant_without_default() {
        let value = Mode::type_info().create_default().unwrap();
        assert_eq!(value.take::<Mode>().unwrap(), Mode::Survival);
    }
}
