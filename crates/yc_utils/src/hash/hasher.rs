//! Provide `NoOpHasher`, which feeds already well-distributed keys such as
//! [`TypeId`](core::any::TypeId) straight through as the hash value.

use core::hash::{BuildHasher, Hasher};

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that passes a written `u64` through unchanged.
///
/// Created through [`NoOpHashState::build_hasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // `TypeId` writes a single `u64`, this path only serves other keys.
        for byte in bytes {
            self.hash = self.hash.rotate_left(8) ^ u64::from(*byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// [`BuildHasher`] for [`NoOpHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use yc_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 7_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 7);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hash;

    #[test]
    fn bytes_fold_into_hash() {
        let mut a = NoOpHashState.build_hasher();
        let mut b = NoOpHashState.build_hasher();
        "left".hash(&mut a);
        "right".hash(&mut b);
        assert_ne!(a.finish(), b.finish());
    }
}
