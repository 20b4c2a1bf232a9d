//! Integer type aliases for counter values and timestamps.
//!
//! Every timestamp, duration, delta and count in this crate is an [`Int`].
//! Timestamps are caller-defined units (milliseconds, ticks, ...) and are
//! never read from a clock by the counters themselves.

use std::sync::atomic::AtomicI64;

/// Alias for the signed integer type used for timestamps, deltas and counts.
///
/// Signed because deltas may be negative and an [`Accumulator`](crate::counters::Accumulator)
/// may go below zero when revokes exceed advances.
pub type Int = i64;

/// Atomic counterpart of [`Int`], used by the lock-free accumulator.
pub type AtomicInt = AtomicI64;
