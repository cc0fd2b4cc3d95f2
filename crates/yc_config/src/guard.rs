//! Re-entrancy flags of [`Config`](crate::Config).
//!
//! A flag is entered through a scoped [`OpGuard`]; entering a busy flag
//! yields nothing, which turns a nested call into a no-op.

use core::cell::Cell;
use core::fmt;

/// The state of an [`OpFlag`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OpState {
    #[default]
    Idle,
    Busy,
}

/// A two-state flag guarding one kind of operation.
///
/// Not thread-safe: it guards against synchronous re-entry only.
///
/// ```
/// use yc_config::guard::{OpFlag, OpState};
///
/// let flag = OpFlag::new();
/// {
///     let _guard = flag.enter().unwrap();
///     assert_eq!(flag.state(), OpState::Busy);
///     assert!(flag.enter().is_none());
/// }
/// assert_eq!(flag.state(), OpState::Idle);
/// ```
#[derive(Default)]
pub struct OpFlag(Cell<OpState>);

impl OpFlag {
    #[inline]
    pub const fn new() -> Self {
        Self(Cell::new(OpState::Idle))
    }

    #[inline]
    pub fn state(&self) -> OpState {
        self.0.get()
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.state() == OpState::Busy
    }

    /// Marks the flag busy until the returned guard is dropped.
    /// Returns `None` if it is already busy.
    pub fn enter(&self) -> Option<OpGuard<'_>> {
        match self.0.replace(OpState::Busy) {
            OpState::Idle => Some(OpGuard(self)),
            OpState::Busy => None,
        }
    }
}

impl fmt::Debug for OpFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpFlag").field(&self.state()).finish()
    }
}

/// Keeps an [`OpFlag`] busy; releases it when dropped, on every exit path.
#[must_use = "the flag is released as soon as the guard is dropped"]
pub struct OpGuard<'a>(&'a OpFlag);

impl Drop for OpGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.0.0.set(OpState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_on_early_return() {
        fn guarded(flag: &OpFlag, fail: bool) -> Result<(), ()> {
            let _guard = flag.enter().ok_or(())?;
            if fail {
                return Err(());
            }
            Ok(())
        }

        let flag = OpFlag::new();
        assert!(guarded(&flag, true).is_err());
        assert!(!flag.is_busy());
        assert!(guarded(&flag, false).is_ok());
        assert!(!flag.is_busy());
    }

    #[test]
    fn nested_enter_is_refused_and_does_not_release() {
        let flag = OpFlag::new();
        let outer = flag.enter().unwrap();
        assert!(flag.enter().is_none());
        assert!(flag.is_busy());
        drop(outer);
        assert!(flag.enter().is_some());
    }
}
