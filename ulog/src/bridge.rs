//! `log` facade adapter
//!
//! Implements [`log::Log`] for [`LogCore`], so records from `log::info!` and
//! friends go through the same tag filter, formatter and sink as the crate's
//! own macros. The record target becomes the tag.

use log::{LevelFilter, Metadata, Record};

use crate::level::Level;
use crate::log_core::LogCore;
use crate::platform::Platform;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Verbose,
        }
    }
}

impl Level {
    /// The `log` filter that lets exactly this level and below through.
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            Level::None => LevelFilter::Off,
            Level::Error => LevelFilter::Error,
            Level::Warn => LevelFilter::Warn,
            Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
            Level::Verbose => LevelFilter::Trace,
        }
    }
}

impl<P: Platform> log::Log for LogCore<P> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.is_enabled(metadata.level().into(), metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        self.write(record.level().into(), record.target(), *record.args());
    }

    fn flush(&self) {}
}

/// Installs the global [`LOGGER`](crate::LOGGER) as the `log` backend.
///
/// The facade's max level is set from the configured maximum; per-tag
/// filtering still happens in the registry.
pub fn init_log_bridge() -> Result<(), log::SetLoggerError> {
    let logger: &'static LogCore = &crate::LOGGER;
    log::set_logger(logger)?;
    log::set_max_level(logger.config().max_level.to_level_filter());
    Ok(())
}
