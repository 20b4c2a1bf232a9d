use std::sync::atomic::Ordering;

use crate::counter::Counter;
use crate::types::{AtomicInt, Int};

/// Cumulative counter with no time decay.
///
/// Every advance adds to a single atomic total and every revoke subtracts
/// from it. The count may go negative if more is revoked than was advanced.
/// All operations are lock-free and safe to call concurrently.
///
/// The timestamp of the latest event is kept for [`duration`](Counter::duration)
/// only. It is updated with a relaxed store that is not ordered with the count
/// update, so under concurrent use it is approximate.
///
/// # Radvance
///
/// An accumulator has no time-partitioned history, so revoking at `hist` and
/// advancing at `now` would cancel out. [`radvance`](Counter::radvance)
/// therefore leaves the count untouched: it records `now` and returns the
/// current count.
///
/// # Example
///
/// ```rust
/// use window_counter_core::{Accumulator, Counter};
///
/// let counter = Accumulator::new(1_000);
/// assert_eq!(counter.advance(1_010, 5), 5);
/// assert_eq!(counter.advance(1_020, 3), 8);
/// assert_eq!(counter.revoke(1_010, 2), 6);
/// assert_eq!(counter.radvance(1_030, 1_010, 100), 6);
/// assert_eq!(counter.duration(), 30);
/// ```
#[derive(Debug)]
pub struct Accumulator {
    /// Creation time
    start: Int,
    /// Time of the latest advance or radvance
    now: AtomicInt,
    /// Running total
    count: AtomicInt,
}

impl Accumulator {
    /// Creates an empty accumulator anchored at `start`.
    pub fn new(start: Int) -> Self {
        Accumulator {
            start,
            now: AtomicInt::new(start),
            count: AtomicInt::new(0),
        }
    }

    /// Returns the current total without touching the timestamp.
    #[inline]
    pub fn count(&self) -> Int {
        self.count.load(Ordering::Acquire)
    }
}

impl Counter for Accumulator {
    #[inline]
    fn advance(&self, now: Int, delta: Int) -> Int {
        self.now.store(now, Ordering::Relaxed);
        self.count.fetch_add(delta, Ordering::AcqRel) + delta
    }

    /// Subtracts `delta`; `hist` is accepted for interface symmetry only.
    #[inline]
    fn revoke(&self, _hist: Int, delta: Int) -> Int {
        self.count.fetch_sub(delta, Ordering::AcqRel) - delta
    }

    #[inline]
    fn radvance(&self, now: Int, _hist: Int, _delta: Int) -> Int {
        self.now.store(now, Ordering::Relaxed);
        self.count()
    }

    #[inline]
    fn zero(&self) {
        self.count.store(0, Ordering::Release);
    }

    #[inline]
    fn duration(&self) -> Int {
        self.now.load(Ordering::Relaxed) - self.start
    }
}
