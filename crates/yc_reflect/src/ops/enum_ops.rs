use crate::Reflect;

/// A fieldless enum, read and written by variant name.
pub trait Enum: Reflect {
    fn variant_name(&self) -> &'static str;

    fn variant_index(&self) -> usize;

    /// Switches to the variant called `name`. Returns `false`, leaving the
    /// value unchanged, if there is no such variant.
    fn set_variant(&mut self, name: &str) -> bool;
}
