//! Core trait for counter algorithms.
//!
//! This module defines the unified trait implemented by every counter in the
//! crate, so callers can swap a plain accumulator for a sliding window (or hold
//! either behind `Box<dyn Counter>`) without changing call sites.

pub use crate::types::Int;

/// The core trait implemented by all counters.
///
/// Timestamps are supplied by the caller on every call and are in whatever
/// unit the caller chose when constructing the counter. Every mutating method
/// returns the count as observed right after the mutation.
pub trait Counter {
    /// Adds `delta` at time `now` and returns the resulting count.
    ///
    /// `advance(now, 0)` is the way to query the current count.
    fn advance(&self, now: Int, delta: Int) -> Int;

    /// Tries to undo `delta` previously recorded at the historical time `hist`.
    fn revoke(&self, hist: Int, delta: Int) -> Int;

    /// Revokes `delta` at `hist`, then advances it at `now`.
    ///
    /// Used to move a recorded contribution from one point in time to another.
    fn radvance(&self, now: Int, hist: Int, delta: Int) -> Int;

    /// Clears the count.
    fn zero(&self);

    /// Returns the elapsed time covered by the counter.
    fn duration(&self) -> Int;
}
