//! Bare-metal backend
//!
//! There is no scheduler and no time source. With a single execution context
//! there is nothing to exclude, so the lock is a plain flag: taking it never
//! waits and never fails, even when an interrupt handler logs while the main
//! context is in the middle of a line. Both timestamps are a constant zero.

use core::sync::atomic::{AtomicBool, Ordering};

use super::{Platform, WallClock};

/// Flag lock for single-context systems.
///
/// Records whether a holder exists but never excludes anyone: every
/// acquisition succeeds at once. The dispatcher only guards `()` with it, so
/// overlapping holders share no data.
pub struct NoOsRawMutex {
    locked: AtomicBool,
}

impl NoOsRawMutex {
    /// Creates an unlocked instance.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    fn mark(&self) -> bool {
        self.locked.store(true, Ordering::Relaxed);
        true
    }
}

impl Default for NoOsRawMutex {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl lock_api::RawMutex for NoOsRawMutex {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        self.mark();
    }

    fn try_lock(&self) -> bool {
        self.mark()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

// 没有时间源，也没有竞争者：超时参数没有意义
unsafe impl lock_api::RawMutexTimed for NoOsRawMutex {
    type Duration = u32;
    type Instant = u32;

    fn try_lock_for(&self, _timeout: u32) -> bool {
        self.mark()
    }

    fn try_lock_until(&self, _deadline: u32) -> bool {
        self.mark()
    }
}

/// Backend for systems without an OS.
pub struct NoOsPlatform;

impl Platform for NoOsPlatform {
    type RawMutex = NoOsRawMutex;

    fn lock_wait() -> u32 {
        0
    }

    fn timestamp() -> u32 {
        0
    }

    fn early_timestamp() -> u32 {
        0
    }

    fn system_timestamp() -> WallClock {
        WallClock::zero()
    }
}
