use alloc::boxed::Box;

use crate::Reflect;

/// A value that may be absent, i.e. `Option<T>`.
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    fn set_none(&mut self);

    /// Stores `value`, handing it back if it has the wrong type.
    fn set_some(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    #[inline]
    fn is_some(&self) -> bool {
        self.value().is_some()
    }
}
