//! Snapshot format for persisting sliding window state.
//!
//! A [`WindowSnapshot`] is the only "wire format" of the crate. The crate does
//! not store it anywhere; with the `serde` feature enabled it can be written to
//! any serde-supported medium by the caller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Int;

/// State of a windowed counter at a point in time.
///
/// `deltas[i]` holds the sum of everything recorded in
/// `[start + i * step, start + (i + 1) * step)`; the last entry is the slot
/// containing `end`.
///
/// Loading expects `step > 0` and `start <= end`. Timestamps past
/// `Int::MAX` saturate during replay instead of wrapping, so a snapshot whose
/// slots run beyond the representable range still keeps its total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowSnapshot {
    /// Anchor time of the first slot in `deltas`.
    pub start: Int,
    /// Time of the most recent event the counter observed.
    pub end: Int,
    /// Width of each slot in `deltas`.
    pub step: Int,
    /// Slot sums, oldest first.
    pub deltas: Vec<Int>,
}

impl WindowSnapshot {
    /// Sum of every slot in the snapshot.
    pub fn total(&self) -> Int {
        self.deltas.iter().sum()
    }

    /// Time span covered by the slots in the snapshot.
    pub fn window(&self) -> Int {
        self.step.saturating_mul(self.deltas.len() as Int)
    }
}

/// Counters that can produce a consistent [`WindowSnapshot`] of themselves.
pub trait Dumper {
    /// Captures the slots still in the window, oldest first, ending at the latest observed time.
    fn dump(&self) -> WindowSnapshot;
}

/// Counters that can be rebuilt from a [`WindowSnapshot`].
///
/// Loading replaces all existing state. The snapshot does not need to come
/// from a counter with the same slot width.
pub trait Loader {
    /// Discards current state and replays `snapshot` into this counter's own slot layout.
    fn load(&self, snapshot: &WindowSnapshot);
}
