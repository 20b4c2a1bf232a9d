//! Lock capability used by the sliding window counter.
//!
//! The counter is generic over a [`Lock`] so the synchronization choice is
//! made once, at construction, and compiled away:
//!
//! - [`std::sync::Mutex`] serializes concurrent callers.
//! - [`NoLock`] skips synchronization entirely. It is `!Sync`, so the
//!   compiler rejects sharing it across threads.
//!
//! Callers can plug in any other primitive by implementing [`Lock`].

use std::cell::RefCell;
use std::sync::{Mutex, PoisonError};

/// Exclusive access to a value for the duration of a closure.
pub trait Lock<T> {
    /// Wraps `value` in the lock.
    fn new(value: T) -> Self;

    /// Runs `f` with exclusive access to the protected value.
    fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> Lock<T> for Mutex<T> {
    #[inline]
    fn new(value: T) -> Self {
        Mutex::new(value)
    }

    #[inline]
    fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        // Counter state is plain integers; a panic in another holder cannot
        // leave it torn in a way later calls can't handle.
        let mut guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// A lock that does nothing, for counters owned by a single thread.
///
/// Backed by a [`RefCell`], so it is `Send` (when `T` is) but never `Sync`.
#[derive(Debug, Default)]
pub struct NoLock<T>(RefCell<T>);

impl<T> Lock<T> for NoLock<T> {
    #[inline]
    fn new(value: T) -> Self {
        NoLock(RefCell::new(value))
    }

    #[inline]
    fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}
