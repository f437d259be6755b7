//! Platform backends
//!
//! A backend supplies the two services the log pipeline cannot provide for
//! itself: serialization of dispatch, and time.
//!
//! - [`posix`]: hosted OS (std), blocking mutex and OS clocks
//! - [`rtos`]: scheduler-based firmware, tick clock with a cycle-counter
//!   fallback before the scheduler starts
//! - [`noos`]: bare metal with no time source
//!
//! Exactly one backend is the [`DefaultPlatform`], chosen by cargo feature
//! (`rtos` > `noos` > `std`). The others stay available for building explicit
//! [`LogCore`](crate::LogCore) instances.

use core::fmt::{self, Write};

use chrono::Timelike;
use lock_api::RawMutexTimed;

#[cfg(feature = "std")]
pub mod posix;

pub mod noos;
pub mod rtos;

/// Capability set of a backend.
///
/// The lock is expressed as a raw mutex: `lock`, `try_lock_for` and `unlock`
/// of [`lock_api::RawMutexTimed`] are the blocking, bounded-wait and release
/// operations. None of them is re-entrant.
pub trait Platform: 'static {
    /// Lock serializing dispatch.
    type RawMutex: RawMutexTimed + Send + Sync;

    /// Bound used by the bounded-wait lock path.
    fn lock_wait() -> <Self::RawMutex as RawMutexTimed>::Duration;

    /// Milliseconds since boot. Wraps silently.
    fn timestamp() -> u32;

    /// Milliseconds from the scheduler-independent early clock.
    fn early_timestamp() -> u32;

    /// Current time of day as `HH:MM:SS.mmm`, or a fallback rendering when no
    /// wall clock is meaningful yet.
    fn system_timestamp() -> WallClock;
}

#[cfg(feature = "rtos")]
/// Backend selected by the enabled features.
pub type DefaultPlatform = rtos::RtosPlatform<rtos::TickPort>;

#[cfg(all(not(feature = "rtos"), feature = "noos"))]
/// Backend selected by the enabled features.
pub type DefaultPlatform = noos::NoOsPlatform;

#[cfg(all(not(feature = "rtos"), not(feature = "noos"), feature = "std"))]
/// Backend selected by the enabled features.
pub type DefaultPlatform = posix::PosixPlatform;

#[cfg(not(any(feature = "rtos", feature = "noos", feature = "std")))]
/// Backend selected by the enabled features.
pub type DefaultPlatform = noos::NoOsPlatform;

/// Capacity of a [`WallClock`] rendering.
pub const WALLCLOCK_CAPACITY: usize = 18;

/// Fixed-size text of a wall-clock timestamp.
///
/// Returned by value, so concurrent callers never share a buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    buf: [u8; WALLCLOCK_CAPACITY],
    len: usize,
}

impl WallClock {
    /// An empty rendering.
    pub const fn empty() -> Self {
        Self {
            buf: [0; WALLCLOCK_CAPACITY],
            len: 0,
        }
    }

    /// `00:00:00.000`
    pub fn zero() -> Self {
        Self::from_hms_milli(0, 0, 0, 0)
    }

    /// Renders `HH:MM:SS.mmm`.
    pub fn from_hms_milli(hour: u32, minute: u32, second: u32, milli: u32) -> Self {
        let mut clock = Self::empty();
        let _ = write!(clock, "{hour:02}:{minute:02}:{second:02}.{milli:03}");
        clock
    }

    /// Renders the time-of-day part of any chrono time value.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        // 闰秒时 nanosecond 可超过 1e9
        let milli = (time.nanosecond() / 1_000_000).min(999);
        Self::from_hms_milli(time.hour(), time.minute(), time.second(), milli)
    }

    /// Renders an uptime in milliseconds as a time of day since midnight.
    pub fn from_uptime_millis(millis: u64) -> Self {
        let secs = millis / 1000;
        Self::from_hms_milli(
            ((secs / 3600) % 24) as u32,
            ((secs / 60) % 60) as u32,
            (secs % 60) as u32,
            (millis % 1000) as u32,
        )
    }

    /// Renders microseconds since the Unix epoch, in UTC.
    pub fn from_epoch_micros(micros: u64) -> Self {
        let secs = i64::try_from(micros / 1_000_000).unwrap_or(i64::MAX);
        let nanos = (micros % 1_000_000) as u32 * 1000;
        match chrono::DateTime::<chrono::Utc>::from_timestamp(secs, nanos) {
            Some(time) => Self::from_time(&time),
            None => Self::zero(),
        }
    }

    /// Decimal digits of an early millisecond counter. Used before any wall
    /// clock exists, so the field still shows how long the system has run.
    pub fn from_digits(value: u32) -> Self {
        let mut clock = Self::empty();
        let _ = write!(clock, "{value}");
        clock
    }

    /// The rendered text.
    pub fn as_str(&self) -> &str {
        // Only whole `&str` fragments are ever copied in, and all are ASCII.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl Write for WallClock {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = WALLCLOCK_CAPACITY - self.len;
        let take = s.len().min(room);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WallClock").field(&self.as_str()).finish()
    }
}
