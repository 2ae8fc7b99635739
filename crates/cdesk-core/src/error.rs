//! # Shared Error Types
//!
//! Errors raised by the foundational types. Each downstream crate defines
//! its own `thiserror` enum for its domain; this one covers only the
//! primitives that live here.

use thiserror::Error;

/// Errors from the foundational types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A timestamp string could not be parsed or used a non-UTC offset.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
