//! Leveled, per-tag logging for targets ranging from hosted operating systems
//! down to bare metal.
//!
//! # Architecture
//!
//! - [`registry`]: per-tag level thresholds with a wildcard default
//! - [`format`]: line layout and the hex / character / hexdump row renderers
//! - [`log_core`]: the dispatcher, [`LogCore`]
//! - [`sink`]: replaceable output function
//! - [`platform`]: lock and clocks, one backend per target
//!
//! The process-wide [`LOGGER`] backs the free functions and the macros.
//! Tests and special-purpose subsystems can build their own [`LogCore`].
//!
//! # Line layout
//!
//! ```text
//! I (12:34:56.789) wifi: connected
//! W (1234) nvs: partition almost full
//! ```

#![no_std]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

extern crate alloc;

pub mod bridge;
pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod log_core;
pub mod macros;
pub mod platform;
pub mod registry;
pub mod sink;

#[cfg(test)]
mod tests;

use core::fmt;

pub use bridge::init_log_bridge;
pub use config::{LogConfig, TimestampSource};
pub use error::{LevelError, ParseLevelError};
pub use level::Level;
pub use log_core::LogCore;
pub use platform::{DefaultPlatform, Platform, WallClock};
pub use registry::WILDCARD;
pub use sink::Sink;

lazy_static::lazy_static! {
    /// Process-wide logger used by the free functions and the macros.
    pub static ref LOGGER: LogCore<DefaultPlatform> = LogCore::new(LogConfig::DEFAULT);
}

/// Sets the level for `tag` on the global logger; `"*"` sets the default.
pub fn level_set(tag: &str, level: Level) -> Result<(), LevelError> {
    LOGGER.level_set(tag, level)
}

/// Effective level for `tag` on the global logger.
pub fn level_get(tag: &str) -> Level {
    LOGGER.level_get(tag)
}

/// Returns true when the global logger would emit `level` under `tag`.
#[inline]
pub fn is_enabled(level: Level, tag: &str) -> bool {
    LOGGER.is_enabled(level, tag)
}

/// Installs `sink` on the global logger and returns the previous one.
pub fn set_sink(sink: Sink) -> Sink {
    LOGGER.set_sink(sink)
}

/// Emits one line through the global logger.
pub fn write(level: Level, tag: &str, args: fmt::Arguments<'_>) {
    LOGGER.write(level, tag, args);
}

/// Bounded-wait variant of [`write`].
pub fn try_write(level: Level, tag: &str, args: fmt::Arguments<'_>) -> bool {
    LOGGER.try_write(level, tag, args)
}

/// Lock-free early-boot variant of [`write`].
pub fn early_write(level: Level, tag: &str, args: fmt::Arguments<'_>) {
    LOGGER.early_write(level, tag, args);
}

/// Hex dump through the global logger.
pub fn buffer_hex(tag: &str, bytes: &[u8], level: Level) {
    LOGGER.buffer_hex(tag, bytes, level);
}

/// Character dump through the global logger.
pub fn buffer_char(tag: &str, bytes: &[u8], level: Level) {
    LOGGER.buffer_char(tag, bytes, level);
}

/// Addressed hexdump through the global logger.
pub fn buffer_hexdump(tag: &str, bytes: &[u8], level: Level) {
    LOGGER.buffer_hexdump(tag, bytes, level);
}

/// Milliseconds since boot on the selected platform.
pub fn timestamp() -> u32 {
    DefaultPlatform::timestamp()
}

/// Early-boot milliseconds on the selected platform.
pub fn early_timestamp() -> u32 {
    DefaultPlatform::early_timestamp()
}

/// Wall-clock text on the selected platform.
pub fn system_timestamp() -> WallClock {
    DefaultPlatform::system_timestamp()
}

/// Lines the global logger lost to sink failures or lock timeouts.
pub fn dropped_count() -> usize {
    LOGGER.dropped_count()
}
