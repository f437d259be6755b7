//! Logging configuration
//!
//! Compile-time settings come from cargo features; [`LogConfig`] carries the
//! runtime copy so independent [`LogCore`](crate::LogCore) instances can be
//! built with other values.

use crate::level::Level;

/// Highest level compiled into call sites. Macros skip anything above it.
pub const MAXIMUM_LEVEL: Level = if cfg!(feature = "max-level-none") {
    Level::None
} else if cfg!(feature = "max-level-error") {
    Level::Error
} else if cfg!(feature = "max-level-warn") {
    Level::Warn
} else if cfg!(feature = "max-level-info") {
    Level::Info
} else if cfg!(feature = "max-level-debug") {
    Level::Debug
} else {
    Level::Verbose
};

/// Level used for tags without an explicit entry.
pub const DEFAULT_LOG_LEVEL: Level = Level::Verbose.min(MAXIMUM_LEVEL);

/// Whether lines carry ANSI color sequences.
pub const COLORS_ENABLED: bool = cfg!(feature = "colors");

/// Which clock fills the timestamp field.
pub const TIMESTAMP_SOURCE: TimestampSource = if cfg!(feature = "system-timestamp") {
    TimestampSource::System
} else {
    TimestampSource::Ticks
};

/// Bytes rendered per row by the buffer dump operations.
pub const BYTES_PER_LINE: usize = 16;

/// Maximum number of explicit per-tag entries.
pub const REGISTRY_CAPACITY: usize = 32;

/// Longest wait of the bounded lock path, in milliseconds.
pub const MAX_MUTEX_WAIT_MS: u32 = 10;

/// Returns true when `level` survives the compile-time cap.
#[inline(always)]
pub const fn level_compiled_in(level: Level) -> bool {
    level.passes(MAXIMUM_LEVEL)
}

/// Source of the timestamp field of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// Milliseconds since boot: `E (1234) tag: ...`
    Ticks,
    /// Wall-clock time: `E (12:34:56.789) tag: ...`
    System,
}

/// Runtime configuration of a [`LogCore`](crate::LogCore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Upper clamp for every configured level
    pub max_level: Level,
    /// Initial level for tags without an explicit entry
    pub default_level: Level,
    /// Emit ANSI colors
    pub colors: bool,
    /// Timestamp field source
    pub timestamp: TimestampSource,
    /// Bound on explicit registry entries
    pub registry_capacity: usize,
}

impl LogConfig {
    /// Configuration derived from the cargo features.
    pub const DEFAULT: Self = Self {
        max_level: MAXIMUM_LEVEL,
        default_level: DEFAULT_LOG_LEVEL,
        colors: COLORS_ENABLED,
        timestamp: TIMESTAMP_SOURCE,
        registry_capacity: REGISTRY_CAPACITY,
    };

    /// Replaces the clamp level.
    pub const fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    /// Replaces the default level.
    pub const fn with_default_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Turns colors on or off.
    pub const fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Replaces the timestamp source.
    pub const fn with_timestamp(mut self, source: TimestampSource) -> Self {
        self.timestamp = source;
        self
    }

    /// Replaces the registry bound.
    pub const fn with_registry_capacity(mut self, capacity: usize) -> Self {
        self.registry_capacity = capacity;
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
