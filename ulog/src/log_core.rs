//! Log system core implementation
//!
//! All logging state lives in one [`LogCore`] value: level registry, sink
//! slot, the dispatch lock and the drop counter. The global
//! [`LOGGER`](crate::LOGGER) is one instance; tests build their own.
//!
//! # Dispatch
//!
//! 1. Resolve the tag's level and return early when the record is filtered.
//! 2. Take the platform lock (blocking, or bounded for [`try_write`]).
//! 3. Render the line(s) and hand each one to the sink.
//! 4. Release the lock when the guard drops, on every path.
//!
//! Sink failures never reach the caller; they are counted in
//! [`dropped_count`].
//!
//! [`try_write`]: LogCore::try_write
//! [`dropped_count`]: LogCore::dropped_count

use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::config::{BYTES_PER_LINE, LogConfig, TimestampSource};
use crate::error::LevelError;
use crate::format::{
    self, CHAR_ROW_CAPACITY, FixedBuf, HEX_ROW_CAPACITY, HEXDUMP_ROW_CAPACITY, Line, Timestamp,
};
use crate::level::Level;
use crate::platform::{DefaultPlatform, Platform, WallClock};
use crate::registry::LevelRegistry;
use crate::sink::{self, Sink, SinkRegistry};

/// Core logging system
///
/// Generic over the [`Platform`] that supplies the lock and the clocks.
/// Every method takes `&self` and is safe to call from several execution
/// contexts at once.
pub struct LogCore<P: Platform = DefaultPlatform> {
    config: LogConfig,
    levels: LevelRegistry,
    sink: SinkRegistry,
    /// Serializes dispatch. Guards no data: rows are rendered into per-call
    /// buffers, so backends whose lock never excludes stay sound.
    serial: lock_api::Mutex<P::RawMutex, ()>,
    /// Lines lost to sink failures or lock timeouts
    dropped: AtomicUsize,
    _platform: PhantomData<fn() -> P>,
}

impl<P: Platform> LogCore<P> {
    /// Creates an instance writing to the [default sink](sink::default_sink).
    pub fn new(config: LogConfig) -> Self {
        Self::with_sink(config, sink::default_sink())
    }

    /// Creates an instance with `sink` installed from the start.
    pub fn with_sink(config: LogConfig, sink: Sink) -> Self {
        Self {
            config,
            levels: LevelRegistry::new(
                config.default_level,
                config.max_level,
                config.registry_capacity,
            ),
            sink: SinkRegistry::new(sink),
            serial: lock_api::Mutex::new(()),
            dropped: AtomicUsize::new(0),
            _platform: PhantomData,
        }
    }

    /// The configuration this instance was built with.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    // ========== Level registry ==========

    /// Sets the level for `tag`; `"*"` sets the default level.
    pub fn level_set(&self, tag: &str, level: Level) -> Result<(), LevelError> {
        self.levels.set(tag, level)
    }

    /// Effective level for `tag`.
    pub fn level_get(&self, tag: &str) -> Level {
        self.levels.get(tag)
    }

    /// Level applied to tags without an explicit entry.
    pub fn default_level(&self) -> Level {
        self.levels.default_level()
    }

    /// Returns true when a record at `level` under `tag` would be emitted.
    #[inline(always)]
    pub fn is_enabled(&self, level: Level, tag: &str) -> bool {
        level.passes(self.config.max_level) && level.passes(self.levels.get(tag))
    }

    // ========== Sink ==========

    /// Installs `sink` and returns the previous one.
    pub fn set_sink(&self, sink: Sink) -> Sink {
        self.sink.install(sink)
    }

    /// The installed sink.
    pub fn sink(&self) -> Sink {
        self.sink.current()
    }

    // ========== Time ==========

    /// Milliseconds since boot, from the platform.
    pub fn timestamp(&self) -> u32 {
        P::timestamp()
    }

    /// Early-boot milliseconds, from the platform.
    pub fn early_timestamp(&self) -> u32 {
        P::early_timestamp()
    }

    /// Wall-clock text, from the platform.
    pub fn system_timestamp(&self) -> WallClock {
        P::system_timestamp()
    }

    // ========== Dispatch ==========

    /// Emits one line. Blocks while another context holds the lock.
    pub fn write(&self, level: Level, tag: &str, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level, tag) {
            return;
        }
        let _guard = self.serial.lock();
        self.emit(level, self.timestamp_field(), tag, args);
    }

    /// Emits one line unless the lock cannot be taken within the platform's
    /// bounded wait. A line lost that way is counted and `false` returned.
    pub fn try_write(&self, level: Level, tag: &str, args: fmt::Arguments<'_>) -> bool {
        if !self.is_enabled(level, tag) {
            return true;
        }
        match self.serial.try_lock_for(P::lock_wait()) {
            Some(_guard) => {
                self.emit(level, self.timestamp_field(), tag, args);
                true
            }
            None => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Emits one line during early boot.
    ///
    /// Skips the tag lookup and the lock, and always uses the early
    /// millisecond clock. Passes when `level` is within both the configured
    /// maximum and the default level.
    pub fn early_write(&self, level: Level, tag: &str, args: fmt::Arguments<'_>) {
        if !level.passes(self.config.max_level) || !level.passes(self.levels.default_level()) {
            return;
        }
        self.emit(level, Timestamp::Millis(P::early_timestamp()), tag, args);
    }

    /// Dumps `bytes` as rows of space-separated hex.
    pub fn buffer_hex(&self, tag: &str, bytes: &[u8], level: Level) {
        self.dump::<HEX_ROW_CAPACITY, _>(tag, bytes, level, |out, _, row| {
            format::render_hex_row(out, row)
        });
    }

    /// Dumps `bytes` as rows of raw characters. Nothing is escaped.
    pub fn buffer_char(&self, tag: &str, bytes: &[u8], level: Level) {
        self.dump::<CHAR_ROW_CAPACITY, _>(tag, bytes, level, |out, _, row| {
            format::render_char_row(out, row)
        });
    }

    /// Dumps `bytes` as addressed hex rows with an ASCII column.
    pub fn buffer_hexdump(&self, tag: &str, bytes: &[u8], level: Level) {
        self.dump::<HEXDUMP_ROW_CAPACITY, _>(tag, bytes, level, format::render_hexdump_row);
    }

    // ========== Diagnostics ==========

    /// Lines lost to sink failures or lock timeouts.
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Restores the state right after construction: configured default
    /// level, no explicit entries, default sink, zeroed counters.
    pub fn reset(&self) {
        self.levels.clear(self.config.default_level);
        self.sink.install(sink::default_sink());
        self.dropped.store(0, Ordering::Relaxed);
    }

    // ========== Internal helpers ==========

    fn timestamp_field(&self) -> Timestamp {
        match self.config.timestamp {
            TimestampSource::Ticks => Timestamp::Millis(P::timestamp()),
            TimestampSource::System => Timestamp::Clock(P::system_timestamp()),
        }
    }

    /// Renders every row of `bytes` with `render` and emits one line per row,
    /// holding the lock across the whole sequence.
    fn dump<const N: usize, F>(&self, tag: &str, bytes: &[u8], level: Level, render: F)
    where
        F: Fn(&mut FixedBuf<N>, usize, &[u8]) -> fmt::Result,
    {
        if bytes.is_empty() || !self.is_enabled(level, tag) {
            return;
        }
        let base = bytes.as_ptr() as usize;
        let _guard = self.serial.lock();
        for (index, row) in format::rows(bytes).enumerate() {
            let address = base.wrapping_add(index * BYTES_PER_LINE);
            let mut text = FixedBuf::<N>::new();
            // FixedBuf 只截断不报错，Err 只能来自行渲染本身
            if render(&mut text, address, row).is_err() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                continue;
            }
            self.emit(
                level,
                self.timestamp_field(),
                tag,
                format_args!("{}", text.as_str()),
            );
        }
    }

    /// Renders one line and hands it to the sink.
    fn emit(&self, level: Level, timestamp: Timestamp, tag: &str, message: fmt::Arguments<'_>) {
        let line = Line {
            level,
            timestamp,
            tag,
            message,
            colors: self.config.colors,
        };
        let sink = self.sink.current();
        if sink(format_args!("{line}")) < 0 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl<P: Platform> Default for LogCore<P> {
    fn default() -> Self {
        Self::new(LogConfig::DEFAULT)
    }
}
