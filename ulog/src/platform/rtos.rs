//! Scheduler-based backend
//!
//! Firmware running under a preemptive scheduler goes through two phases:
//!
//! 1. **Before the scheduler starts** there is exactly one execution context.
//!    The lock degrades to a no-op and time comes from the CPU cycle counter.
//! 2. **After the scheduler starts** the lock is a real spin lock that yields
//!    to the scheduler, and time is `baseline + ticks`, where the baseline is
//!    the cycle-counter reading captured once at the first timestamp taken
//!    after the switch. The timeline stays continuous across the transition.
//!
//! The scheduler is reached through [`SchedulerPort`]. [`TickPort`] is a
//! ready-made port for kernels that only need to report start-up and ticks.

use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use once_cell::race::OnceRef;
use spin::Once;

use super::{Platform, WallClock};
use crate::config::MAX_MUTEX_WAIT_MS;

/// Attempts before the bounded path gives up even if ticks stopped moving,
/// as they do inside an interrupt handler with the tick interrupt masked.
const MAX_TIMED_SPINS: u32 = 1 << 16;

/// Tick rate [`TickPort`] assumes until the scheduler reports its own.
pub const DEFAULT_TICK_RATE_HZ: u32 = 100;

/// Hooks into the scheduler the logger runs under.
///
/// # Safety
///
/// While [`scheduler_started`](Self::scheduler_started) returns `false`, at
/// most one execution context may exist. The lock is skipped in that phase.
/// Once it has returned `true` it must never return `false` again.
pub unsafe trait SchedulerPort: 'static {
    /// Whether concurrent execution has begun.
    fn scheduler_started() -> bool;

    /// Scheduler tick counter. Must be callable from interrupt context.
    fn tick_count() -> u32;

    /// Ticks per second.
    fn tick_rate_hz() -> u32;

    /// Storage for the baseline captured at the phase switch.
    fn timestamp_base() -> &'static Once<u32>;

    /// Called between lock attempts.
    fn yield_now() {
        core::hint::spin_loop();
    }

    /// Whether the caller runs on the core that owns the baseline capture.
    fn is_primary_core() -> bool {
        true
    }

    /// Milliseconds derived from the CPU cycle counter.
    fn cycle_timestamp() -> u32 {
        0
    }

    /// Microseconds since the Unix epoch, when a real-time clock is set.
    fn realtime_micros() -> Option<u64> {
        None
    }
}

/// Spin lock that is a no-op before the scheduler starts.
pub struct RtosRawMutex<S> {
    locked: AtomicBool,
    _port: PhantomData<fn() -> S>,
}

impl<S: SchedulerPort> RtosRawMutex<S> {
    /// Creates an unlocked instance.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
            _port: PhantomData,
        }
    }

    fn acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }
}

impl<S: SchedulerPort> Default for RtosRawMutex<S> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<S: SchedulerPort> lock_api::RawMutex for RtosRawMutex<S> {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        if !S::scheduler_started() {
            return;
        }
        while !self.acquire() {
            S::yield_now();
        }
    }

    fn try_lock(&self) -> bool {
        if !S::scheduler_started() {
            return true;
        }
        self.acquire()
    }

    unsafe fn unlock(&self) {
        if !S::scheduler_started() {
            return;
        }
        self.locked.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

unsafe impl<S: SchedulerPort> lock_api::RawMutexTimed for RtosRawMutex<S> {
    /// Ticks to wait.
    type Duration = u32;
    /// Tick count at which to give up.
    type Instant = u32;

    fn try_lock_for(&self, ticks: u32) -> bool {
        self.try_lock_until(S::tick_count().wrapping_add(ticks))
    }

    fn try_lock_until(&self, deadline: u32) -> bool {
        if !S::scheduler_started() {
            return true;
        }
        let mut spins = 0;
        loop {
            if self.acquire() {
                return true;
            }
            // 计数器回绕时按有符号差值比较
            let expired = S::tick_count().wrapping_sub(deadline) as i32 >= 0;
            if expired || spins >= MAX_TIMED_SPINS {
                return false;
            }
            spins += 1;
            S::yield_now();
        }
    }
}

/// Backend for scheduler-based firmware.
pub struct RtosPlatform<S>(PhantomData<fn() -> S>);

impl<S: SchedulerPort> RtosPlatform<S> {
    fn ticks_to_ms(ticks: u32) -> u32 {
        let hz = u64::from(S::tick_rate_hz().max(1));
        (u64::from(ticks) * 1000 / hz) as u32
    }
}

impl<S: SchedulerPort> Platform for RtosPlatform<S> {
    type RawMutex = RtosRawMutex<S>;

    /// [`MAX_MUTEX_WAIT_MS`] in ticks, rounded up, at least one.
    fn lock_wait() -> u32 {
        let hz = S::tick_rate_hz().max(1);
        let ticks = (MAX_MUTEX_WAIT_MS.saturating_mul(hz)).div_ceil(1000);
        ticks.max(1)
    }

    fn timestamp() -> u32 {
        if !S::scheduler_started() {
            return Self::early_timestamp();
        }
        let base = S::timestamp_base();
        let base = if S::is_primary_core() {
            *base.call_once(S::cycle_timestamp)
        } else {
            base.get().copied().unwrap_or(0)
        };
        base.wrapping_add(Self::ticks_to_ms(S::tick_count()))
    }

    fn early_timestamp() -> u32 {
        S::cycle_timestamp()
    }

    fn system_timestamp() -> WallClock {
        if !S::scheduler_started() {
            return WallClock::from_digits(Self::early_timestamp());
        }
        match S::realtime_micros() {
            Some(micros) => WallClock::from_epoch_micros(micros),
            None => WallClock::from_uptime_millis(u64::from(Self::timestamp())),
        }
    }
}

/// Clock hooks for [`TickPort`].
pub struct ClockSource {
    /// Milliseconds from the CPU cycle counter
    pub cycle_timestamp: fn() -> u32,
    /// Microseconds since the Unix epoch, when known
    pub realtime_micros: fn() -> Option<u64>,
}

static STARTED: AtomicBool = AtomicBool::new(false);
static TICKS: AtomicU32 = AtomicU32::new(0);
static TICK_RATE_HZ: AtomicU32 = AtomicU32::new(DEFAULT_TICK_RATE_HZ);
static BASE: Once<u32> = Once::new();
static CLOCK: OnceRef<'static, ClockSource> = OnceRef::new();

/// Port driven by the kernel: it reports start-up once and calls
/// [`on_tick`](TickPort::on_tick) from its timer interrupt.
pub struct TickPort;

impl TickPort {
    /// Installs the clock hooks. Only the first call takes effect.
    pub fn install_clock(source: &'static ClockSource) -> bool {
        CLOCK.set(source).is_ok()
    }

    /// Marks the start of concurrent execution.
    ///
    /// # Safety
    ///
    /// Must be called from the only execution context, before any other
    /// context can reach the logger.
    pub unsafe fn start_scheduler(tick_rate_hz: u32) {
        TICK_RATE_HZ.store(tick_rate_hz.max(1), Ordering::Relaxed);
        STARTED.store(true, Ordering::Release);
    }

    /// Advances the tick counter by one.
    pub fn on_tick() {
        TICKS.fetch_add(1, Ordering::Relaxed);
    }

    /// Current tick count.
    pub fn ticks() -> u32 {
        TICKS.load(Ordering::Relaxed)
    }
}

unsafe impl SchedulerPort for TickPort {
    fn scheduler_started() -> bool {
        STARTED.load(Ordering::Acquire)
    }

    fn tick_count() -> u32 {
        TICKS.load(Ordering::Relaxed)
    }

    fn tick_rate_hz() -> u32 {
        TICK_RATE_HZ.load(Ordering::Relaxed)
    }

    fn timestamp_base() -> &'static Once<u32> {
        &BASE
    }

    fn cycle_timestamp() -> u32 {
        CLOCK.get().map_or(0, |clock| (clock.cycle_timestamp)())
    }

    fn realtime_micros() -> Option<u64> {
        CLOCK.get().and_then(|clock| (clock.realtime_micros)())
    }
}
