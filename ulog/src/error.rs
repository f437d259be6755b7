//! Error types
//!
//! Nothing here ever crosses the logging call boundary: only configuration
//! calls (`level_set`, level parsing) return these.

use core::fmt;

/// Rejection reasons for a level registry update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// Tags must be non-empty
    EmptyTag,
    /// The registry already holds `capacity` explicit entries
    CapacityExceeded {
        /// Configured bound on explicit entries
        capacity: usize,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::EmptyTag => f.write_str("log tag must not be empty"),
            LevelError::CapacityExceeded { capacity } => {
                write!(f, "level registry is full ({capacity} tags)")
            }
        }
    }
}

impl core::error::Error for LevelError {}

/// Returned when a string names no known level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLevelError;

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognized log level")
    }
}

impl core::error::Error for ParseLevelError {}
