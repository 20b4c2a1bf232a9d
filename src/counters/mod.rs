//! Counter implementations.
//!
//! - **[`Accumulator`]** - Lock-free running total with no time decay
//! - **[`SlidingWindowCounter`]** - Total over a sliding window of time slots, with
//!   revoke/radvance for late or corrected events and snapshot/restore
//!
//! | Counter | Memory | Forgets old deltas | Revoke by time | Snapshot |
//! |---------|--------|--------------------|----------------|----------|
//! | Accumulator | One integer | No | No (plain subtract) | No |
//! | Sliding Window | `slots + 1` integers | Yes, with smooth decay | Yes | Yes |

pub mod accumulator;
pub use accumulator::Accumulator;

pub mod sliding_window_counter;
pub use sliding_window_counter::NoLockSlidingWindowCounter;
pub use sliding_window_counter::SlidingWindowConfig;
pub use sliding_window_counter::SlidingWindowCounter;
pub use sliding_window_counter::WindowState;
