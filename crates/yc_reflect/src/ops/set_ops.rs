use alloc::boxed::Box;

use crate::Reflect;

/// A collection of unique values, e.g. `HashSet<T>`.
///
/// Whether the iteration order is deterministic is recorded in
/// [`SetInfo::is_ordered`](crate::info::SetInfo::is_ordered).
pub trait Set: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Inserts a value, returning whether it was new. A value of the wrong
    /// type is handed back.
    fn insert(&mut self, value: Box<dyn Reflect>) -> Result<bool, Box<dyn Reflect>>;

    fn clear(&mut self);
}
