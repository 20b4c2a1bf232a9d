use std::sync::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::counter::Counter;
use crate::error::{ConfigError, ConfigResult};
use crate::lock::{Lock, NoLock};
use crate::snapshot::{Dumper, Loader, WindowSnapshot};
use crate::types::Int;

/// Sliding window counter over a ring of fixed-width time slots.
///
/// The window of length `window` is split into `slots` slots of
/// `step = window / slots` each. Every delta is added to the slot its
/// timestamp falls into; as time moves forward, slots that leave the window
/// are cleared and their contents stop counting.
///
/// # Algorithm Behavior
///
/// - Slot `k` covers `[start + k * step, start + (k + 1) * step)` and lives at
///   ring index `k mod (slots + 1)`
/// - The ring holds one slot more than the window. That extra slot is the one
///   currently sliding out, and its contents decay linearly as the current
///   slot fills up, so the reported count moves smoothly instead of dropping a
///   whole slot at each boundary
/// - Time never moves backwards: an advance older than the latest one lands in
///   the current slot
/// - A running sum is kept next to the slots, so queries are O(1)
///
/// # Locking
///
/// The lock type `L` is picked at construction and compiled in:
/// [`new`](SlidingWindowCounter::new) uses a [`Mutex`],
/// [`new_no_lock`](SlidingWindowCounter::new_no_lock) uses a [`NoLock`] for
/// single-threaded owners, and [`with_lock`](SlidingWindowCounter::with_lock)
/// accepts any [`Lock`] implementation.
///
/// # Example
///
/// ```rust
/// use window_counter_core::{Counter, SlidingWindowCounter};
///
/// // 60 second window, 60 one-second slots, timestamps in milliseconds
/// let counter = SlidingWindowCounter::new(0, 60_000, 60);
///
/// assert_eq!(counter.advance(500, 10), 10);    // slot 0
/// assert_eq!(counter.advance(1_500, 10), 20);  // slot 1
///
/// // Half of the first second has slid out of the window
/// assert_eq!(counter.advance(60_500, 0), 15);
///
/// // The first second is gone
/// assert_eq!(counter.advance(61_000, 0), 10);
/// assert_eq!(counter.duration(), 60_000);
/// ```
#[derive(Debug)]
pub struct SlidingWindowCounter<L = Mutex<WindowState>> {
    /// Width of each slot
    step: Int,
    /// Number of slots in the window (the ring holds one more)
    slot_count: usize,
    /// Window state behind the chosen lock
    state: L,
}

/// Sliding window counter for single-threaded use.
pub type NoLockSlidingWindowCounter = SlidingWindowCounter<NoLock<WindowState>>;

/// Mutable state of a [`SlidingWindowCounter`], guarded by its lock.
#[derive(Debug, Clone)]
pub struct WindowState {
    /// Anchor of slot 0
    start: Int,
    /// Width of each slot
    step: Int,
    /// Ring of `slot_count + 1` slot sums
    slots: Vec<Int>,
    /// Sum of all slots
    count: Int,
    /// Latest observed time
    now: Int,
}

impl WindowState {
    fn new(start: Int, step: Int, slot_count: usize) -> Self {
        WindowState {
            start,
            step,
            slots: vec![0; slot_count + 1],
            count: 0,
            now: start,
        }
    }

    #[inline]
    fn ring(&self) -> Int {
        self.slots.len() as Int
    }

    /// Absolute slot number of `t`, negative before `start`.
    #[inline]
    fn slot_of(&self, t: Int) -> Int {
        (t - self.start).div_euclid(self.step)
    }

    #[inline]
    fn index(&self, slot: Int) -> usize {
        slot.rem_euclid(self.ring()) as usize
    }

    #[inline]
    fn current(&self) -> Int {
        self.slot_of(self.now).max(0)
    }

    fn reset(&mut self, start: Int) {
        self.start = start;
        self.slots.fill(0);
        self.count = 0;
        self.now = start;
    }

    fn zero(&mut self) {
        let now = self.now;
        self.reset(self.start);
        self.now = now;
    }

    fn advance(&mut self, now: Int, delta: Int) {
        let current = self.current();
        let next = self.slot_of(now).max(current);

        // fast path: still inside the current slot
        if next == current {
            let i = self.index(next);
            self.slots[i] += delta;
            self.count += delta;
            if now > self.now {
                self.now = now;
            }
            return;
        }

        // the whole ring expired
        if next - current >= self.ring() {
            trace!(
                from_slot = current,
                to_slot = next,
                dropped = self.count,
                "sliding window fully expired"
            );
            self.slots.fill(0);
            let i = self.index(next);
            self.slots[i] = delta;
            self.count = delta;
            self.now = now;
            return;
        }

        for slot in current + 1..=next {
            let i = self.index(slot);
            self.count -= self.slots[i];
            self.slots[i] = 0;
        }
        let i = self.index(next);
        self.slots[i] += delta;
        self.count += delta;
        self.now = now;
    }

    fn revoke(&mut self, hist: Int, delta: Int) {
        let current = self.current();
        let prev = self.slot_of(hist);
        let age = current - prev;

        if prev < 0 || age < 0 || age >= self.ring() {
            trace!(hist, current_slot = current, hist_slot = prev, "revoke outside window ignored");
            return;
        }

        let i = self.index(prev);
        let reduce = delta.min(self.slots[i]).max(0);
        self.slots[i] -= reduce;
        self.count -= reduce;
    }

    /// Count with the outgoing slot decayed by how far the current slot has progressed.
    ///
    /// The decayed share is floored, so a negative outgoing slot rounds away from zero.
    fn calculate(&self) -> Int {
        let current = self.slot_of(self.now);
        if current < 0 {
            return self.count;
        }
        let expired = self.slots[self.index(current + 1)];
        let elapsed = (self.now - self.start).rem_euclid(self.step);
        let decayed = (i128::from(expired) * i128::from(elapsed)).div_euclid(i128::from(self.step));
        self.count - decayed as Int
    }

    fn duration(&self) -> Int {
        let window = self.step * (self.ring() - 1);
        (self.now - self.start).min(window)
    }

    fn dump(&self) -> WindowSnapshot {
        let ring = self.ring();
        let current = self.current();
        let begin = if current >= ring { current - (ring - 1) } else { 0 };

        WindowSnapshot {
            start: self.start + begin * self.step,
            end: self.now,
            step: self.step,
            deltas: (begin..=current).map(|slot| self.slots[self.index(slot)]).collect(),
        }
    }

    /// Replays `snapshot` as advances spread across this counter's own slot width.
    fn load(&mut self, snapshot: &WindowSnapshot) {
        self.reset(snapshot.start);

        let segs = segments(snapshot.step, self.step);
        let end = snapshot.end;
        debug!(
            source_step = snapshot.step,
            target_step = self.step,
            segments = segs,
            slots = snapshot.deltas.len(),
            total = snapshot.total(),
            "loading sliding window snapshot"
        );

        let sub_step = snapshot.step / segs;
        for (i, &delta) in snapshot.deltas.iter().enumerate() {
            let part = delta / segs;
            let mut remain = delta;
            let mut now = snapshot
                .start
                .saturating_add((i as Int).saturating_mul(snapshot.step));
            let mut last = now;

            for _ in 0..segs {
                if now >= end {
                    last = end;
                    break;
                }
                self.advance(now, part);
                remain -= part;
                last = now;
                now = now.saturating_add(sub_step);
            }

            // truncation leftovers land on the last sub-advance
            self.advance(last, remain);
        }

        self.advance(end, 0);
    }
}

/// `round(source / target)`, at least 1.
#[inline]
fn segments(source: Int, target: Int) -> Int {
    (source.saturating_mul(2).saturating_add(target) / target.saturating_mul(2)).max(1)
}

impl SlidingWindowCounter {
    /// Creates a mutex-protected sliding window counter.
    ///
    /// # Parameters
    ///
    /// * `start` - Anchor time of slot 0; also the initial "now"
    /// * `window` - Total window length, in the caller's time unit
    /// * `slots` - Number of slots the window is split into
    ///
    /// # Panics
    ///
    /// Panics if `slots` is zero or if `window / slots` truncates to zero.
    /// Use [`SlidingWindowConfig`] with `try_from` for a checked path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use window_counter_core::SlidingWindowCounter;
    ///
    /// // one minute in milliseconds, split into 6 slots of 10 seconds
    /// let counter = SlidingWindowCounter::new(0, 60_000, 6);
    /// assert_eq!(counter.step(), 10_000);
    /// ```
    pub fn new(start: Int, window: Int, slots: usize) -> Self {
        Self::with_lock(start, window, slots)
    }
}

impl SlidingWindowCounter<NoLock<WindowState>> {
    /// Creates a sliding window counter without synchronization.
    ///
    /// The result is not `Sync`; it can be moved to another thread but never
    /// shared. Panics under the same conditions as [`SlidingWindowCounter::new`].
    pub fn new_no_lock(start: Int, window: Int, slots: usize) -> Self {
        Self::with_lock(start, window, slots)
    }
}

impl<L: Lock<WindowState>> SlidingWindowCounter<L> {
    /// Creates a sliding window counter guarded by the lock type `L`.
    ///
    /// # Panics
    ///
    /// Panics if `slots` is zero or if `window / slots` truncates to zero.
    pub fn with_lock(start: Int, window: Int, slots: usize) -> Self {
        assert!(slots > 0, "slots must be greater than 0");
        let step = window / slots as Int;
        assert!(step > 0, "window must cover at least one tick per slot");
        Self::build(start, step, slots)
    }

    fn build(start: Int, step: Int, slot_count: usize) -> Self {
        debug!(start, step, slots = slot_count, "creating sliding window counter");
        SlidingWindowCounter {
            step,
            slot_count,
            state: L::new(WindowState::new(start, step, slot_count)),
        }
    }

    /// Width of one slot.
    #[inline]
    pub fn step(&self) -> Int {
        self.step
    }

    /// Number of slots in the window.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Length of the window, `step * slot_count`.
    ///
    /// May be shorter than the `window` passed at construction when it does
    /// not divide evenly by the slot count.
    #[inline]
    pub fn window(&self) -> Int {
        self.step * self.slot_count as Int
    }

    /// Current anchor of slot 0.
    pub fn start(&self) -> Int {
        self.state.with(|state| state.start)
    }

    /// Latest time the counter has observed.
    pub fn now(&self) -> Int {
        self.state.with(|state| state.now)
    }
}

impl<L: Lock<WindowState>> Counter for SlidingWindowCounter<L> {
    /// Records `delta` at `now` and returns the decayed window count.
    ///
    /// A `now` earlier than the latest observed time is clamped forward; the
    /// delta then lands in the current slot.
    fn advance(&self, now: Int, delta: Int) -> Int {
        self.state.with(|state| {
            state.advance(now, delta);
            state.calculate()
        })
    }

    /// Removes up to `delta` from the slot that held `hist`.
    ///
    /// The slot never goes below zero. Nothing happens if `hist` is before the
    /// anchor, after the latest observed time, or has already left the ring.
    fn revoke(&self, hist: Int, delta: Int) -> Int {
        self.state.with(|state| {
            state.revoke(hist, delta);
            state.calculate()
        })
    }

    fn radvance(&self, now: Int, hist: Int, delta: Int) -> Int {
        self.state.with(|state| {
            state.revoke(hist, delta);
            state.advance(now, delta);
            state.calculate()
        })
    }

    /// Clears every slot. The anchor and the latest observed time are kept.
    fn zero(&self) {
        self.state.with(WindowState::zero)
    }

    /// Time since the anchor, capped at the window length.
    fn duration(&self) -> Int {
        self.state.with(|state| state.duration())
    }
}

impl<L: Lock<WindowState>> Dumper for SlidingWindowCounter<L> {
    /// Snapshots the slots from the oldest one still in the ring to the current one.
    ///
    /// The oldest entry is the slot currently decaying out of the window, so
    /// loading the snapshot into an identically configured counter reproduces
    /// the same count at `end` exactly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use window_counter_core::{Counter, Dumper, Loader, SlidingWindowCounter};
    ///
    /// let counter = SlidingWindowCounter::new(0, 40, 4);
    /// counter.advance(5, 1);
    /// counter.advance(15, 2);
    /// counter.advance(25, 3);
    ///
    /// let snapshot = counter.dump();
    /// assert_eq!(snapshot.start, 0);
    /// assert_eq!(snapshot.end, 25);
    /// assert_eq!(snapshot.step, 10);
    /// assert_eq!(snapshot.deltas, vec![1, 2, 3]);
    ///
    /// let restored = SlidingWindowCounter::new_no_lock(1_000, 40, 4);
    /// restored.load(&snapshot);
    /// assert_eq!(restored.advance(25, 0), counter.advance(25, 0));
    /// ```
    fn dump(&self) -> WindowSnapshot {
        self.state.with(|state| state.dump())
    }
}

impl<L: Lock<WindowState>> Loader for SlidingWindowCounter<L> {
    /// Replaces all state with the contents of `snapshot`.
    ///
    /// The counter is re-anchored at `snapshot.start`. Each snapshot slot is
    /// replayed as `max(round(snapshot.step / step), 1)` advances spread over
    /// the slot's time span and clamped to `snapshot.end`. Whatever equal
    /// splitting leaves over goes to the final sub-advance of its own slot, so
    /// a snapshot taken with a different slot width keeps both its total and
    /// its rough distribution in time.
    fn load(&self, snapshot: &WindowSnapshot) {
        self.state.with(|state| state.load(snapshot))
    }
}

/// Configuration structure for creating a [`SlidingWindowCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlidingWindowConfig {
    /// Anchor time of slot 0.
    pub start: Int,
    /// Total window length.
    pub window: Int,
    /// Number of slots the window is split into.
    pub slots: usize,
}

impl SlidingWindowConfig {
    /// Creates a new configuration instance.
    pub fn new(start: Int, window: Int, slots: usize) -> Self {
        Self { start, window, slots }
    }

    /// Slot width this configuration produces, or 0 when `slots` is 0.
    pub fn step(&self) -> Int {
        if self.slots == 0 {
            return 0;
        }
        self.window / self.slots as Int
    }

    /// Checks that the configuration yields at least one slot of positive width.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.slots == 0 {
            return Err(ConfigError::ZeroSlots);
        }
        if self.step() <= 0 {
            return Err(ConfigError::WindowTooShort {
                window: self.window,
                slots: self.slots,
            });
        }
        Ok(())
    }
}

impl<L: Lock<WindowState>> TryFrom<SlidingWindowConfig> for SlidingWindowCounter<L> {
    type Error = ConfigError;

    /// Builds a counter from a configuration, rejecting invalid ones.
    ///
    /// # Example
    ///
    /// ```
    /// use window_counter_core::{ConfigError, SlidingWindowConfig, SlidingWindowCounter};
    ///
    /// let counter: SlidingWindowCounter = SlidingWindowConfig::new(0, 60, 6).try_into().unwrap();
    /// assert_eq!(counter.step(), 10);
    ///
    /// let err = <SlidingWindowCounter>::try_from(SlidingWindowConfig::new(0, 5, 6)).unwrap_err();
    /// assert_eq!(err, ConfigError::WindowTooShort { window: 5, slots: 6 });
    /// ```
    fn try_from(config: SlidingWindowConfig) -> ConfigResult<Self> {
        if let Err(err) = config.validate() {
            warn!(
                start = config.start,
                window = config.window,
                slots = config.slots,
                error = %err,
                "rejected sliding window configuration"
            );
            return Err(err);
        }
        Ok(Self::build(config.start, config.step(), config.slots))
    }
}
