//! Hosted backend (std)
//!
//! Threads contend for real here. The lock is a parking mutex: waiters sleep
//! in the OS instead of spinning, and `try_lock_for` gives up once its
//! deadline passes. Timestamps come from the monotonic clock, measured from
//! the first query, and from the local wall clock.

use std::time::{Duration, Instant};

use super::{Platform, WallClock};
use crate::config::MAX_MUTEX_WAIT_MS;

lazy_static::lazy_static! {
    /// Origin of [`PosixPlatform::timestamp`].
    static ref EPOCH: Instant = Instant::now();
}

/// Parking mutex for hosted targets.
pub type PosixRawMutex = parking_lot::RawMutex;

/// Backend for hosted operating systems.
pub struct PosixPlatform;

impl Platform for PosixPlatform {
    type RawMutex = PosixRawMutex;

    fn lock_wait() -> Duration {
        Duration::from_millis(u64::from(MAX_MUTEX_WAIT_MS))
    }

    fn timestamp() -> u32 {
        EPOCH.elapsed().as_millis() as u32
    }

    fn early_timestamp() -> u32 {
        Self::timestamp()
    }

    fn system_timestamp() -> WallClock {
        WallClock::from_time(&chrono::Local::now())
    }
}

#[cfg(test)]
mod tests {
    use lock_api::{RawMutex, RawMutexTimed};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_try_lock_for_times_out_while_held() {
        let raw = <PosixRawMutex as RawMutex>::INIT;
        raw.lock();

        let start = Instant::now();
        assert!(!raw.try_lock_for(Duration::from_millis(10)));
        assert!(start.elapsed() >= Duration::from_millis(10));

        unsafe { raw.unlock() };
        assert!(raw.try_lock_for(Duration::from_millis(10)));
        unsafe { raw.unlock() };
    }

    #[test]
    fn test_lock_serializes_threads() {
        let counter = Arc::new(lock_api::Mutex::<PosixRawMutex, u64>::new(0));
        let handles: std::vec::Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        *counter.lock() += 1;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*counter.lock(), 4000);
    }

    #[test]
    fn test_waiter_blocks_until_release() {
        let serial = Arc::new(lock_api::Mutex::<PosixRawMutex, ()>::new(()));
        let guard = serial.lock();

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let waiter = {
            let serial = Arc::clone(&serial);
            std::thread::spawn(move || {
                let _guard = serial.lock();
                done_tx.send(()).unwrap();
            })
        };

        assert!(done_rx.recv_timeout(Duration::from_millis(50)).is_err());
        drop(guard);
        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        waiter.join().unwrap();
    }

    #[test]
    fn test_timestamp_is_monotonic() {
        let first = PosixPlatform::timestamp();
        std::thread::sleep(Duration::from_millis(5));
        assert!(PosixPlatform::timestamp() >= first);
        assert_eq!(PosixPlatform::system_timestamp().as_str().len(), 12);
    }
}
