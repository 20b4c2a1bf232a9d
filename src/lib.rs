//! Concurrency-safe counters for tracking a running total and its recent rate.
//!
//! This library provides counters for rate limiting, quota enforcement and
//! throughput metering. Callers feed in timestamped deltas and read back a
//! count; what a delta means (bytes, requests, errors) is up to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use window_counter_core::{Counter, SlidingWindowCounter};
//!
//! // Requests seen over the last 10 seconds, in 1 second slots, timestamps in ms
//! let requests = SlidingWindowCounter::new(0, 10_000, 10);
//!
//! requests.advance(100, 1);
//! requests.advance(2_300, 1);
//! let in_window = requests.advance(2_400, 1);
//! assert_eq!(in_window, 3);
//! ```
//!
//! # Available Counters
//!
//! ## [Accumulator](counters::Accumulator)
//! A plain running total, updated with atomics:
//! ```rust
//! # use window_counter_core::{Accumulator, Counter};
//! let total = Accumulator::new(0);
//! total.advance(5, 42);
//! ```
//!
//! ## [Sliding Window Counter](counters::SlidingWindowCounter)
//! A total over the last `window` time units that forgets old deltas, decaying
//! the oldest slot smoothly rather than dropping it at once:
//! ```rust
//! # use window_counter_core::SlidingWindowCounter;
//! let counter = SlidingWindowCounter::new(0, 60_000, 60); // 60 one-second slots
//! ```
//!
//! # Core Concepts
//!
//! ## Time Representation
//! Counters never read a clock. Every call carries the caller's timestamp as
//! an [`Int`], in any unit, as long as it is used consistently.
//!
//! ## Correcting History
//! [`Counter::revoke`] undoes a delta recorded at an earlier time and
//! [`Counter::radvance`] moves a delta from an earlier time to a new one in a
//! single step, for late or re-attributed events.
//!
//! ## Snapshots
//! A sliding window counter can be [dumped](Dumper) to a [`WindowSnapshot`]
//! and [loaded](Loader) back, also into a counter with a different slot width.
//! With the `serde` feature (on by default) the snapshot is serializable.
//!
//! ## Thread Safety
//! [`Accumulator`] is lock-free. [`SlidingWindowCounter`] serializes callers
//! through a [`Mutex`](std::sync::Mutex) by default, or skips locking entirely
//! through [`NoLock`] when a single thread owns it
//! ([`SlidingWindowCounter::new_no_lock`]).
//!
//! ## Logging
//! Noteworthy events (construction, full window expiry, ignored revokes,
//! snapshot loads, rejected configurations) are emitted through [`tracing`].
//! The crate never installs a subscriber.

pub mod counter;
pub mod counters;
pub mod error;
pub mod lock;
pub mod snapshot;
pub mod types;

pub use counter::Counter;
pub use counters::{
    Accumulator, NoLockSlidingWindowCounter, SlidingWindowConfig, SlidingWindowCounter,
    WindowState,
};
pub use error::{ConfigError, ConfigResult};
pub use lock::{Lock, NoLock};
pub use snapshot::{Dumper, Loader, WindowSnapshot};
pub use types::{AtomicInt, Int};
