use alloc::boxed::Box;

use crate::Reflect;

/// A key-value collection, e.g. `BTreeMap<K, V>`.
///
/// Whether the iteration order is deterministic is recorded in
/// [`MapInfo::is_ordered`](crate::info::MapInfo::is_ordered).
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Inserts an entry, replacing an existing value under the same key.
    /// A key or value of the wrong type hands both back.
    #[allow(clippy::type_complexity)]
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;

    fn clear(&mut self);
}
