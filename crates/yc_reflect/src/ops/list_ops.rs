use alloc::boxed::Box;

use crate::Reflect;

/// An ordered sequence that keeps duplicates, e.g. `Vec<T>`.
pub trait List: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends an element, handing it back if it has the wrong type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn clear(&mut self);
}

impl<'a> dyn List + 'a {
    /// Iterates over the elements in order.
    ///
    /// ```
    /// use yc_reflect::ops::List;
    ///
    /// let list: &dyn List = &vec![1_u8, 2];
    /// let items: Vec<_> = list.iter().filter_map(|v| v.downcast_ref::<u8>()).collect();
    /// assert_eq!(items, [&1, &2]);
    /// ```
    #[inline]
    pub fn iter(&self) -> ListIter<'_> {
        ListIter {
            list: self,
            index: 0,
        }
    }
}

/// An iterator over the elements of a [`List`].
pub struct ListIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ListIter<'_> {}
