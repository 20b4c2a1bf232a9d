//! error.rs
//! Configuration errors for counter construction.
//!
//! Counter operations themselves never fail: out-of-range timestamps are
//! clamped or ignored. Only building a counter from an unchecked
//! configuration can be rejected.

use crate::types::Int;

/// Error returned when a sliding window configuration cannot produce a counter.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The window must be divided into at least one slot.
    #[error("slot count must be greater than 0")]
    ZeroSlots,
    /// `window / slots` truncates to a slot width of zero or less.
    #[error("window {window} is too short for {slots} slot(s): each slot must cover at least one tick")]
    WindowTooShort { window: Int, slots: usize },
}

/// Result type for fallible counter construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
