// src/utils/time.rs
//! Clock abstraction for timestamp synthesis and deterministic tests

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock source used to back-date valleys and measure the frame rate.
///
/// Injected into the pipeline so tests can drive analysis with a manual
/// clock instead of the system time.
pub trait Clock: Send + Sync {
    /// Current time in nanoseconds since the Unix epoch.
    fn now_nanos(&self) -> u64;
}

/// Clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    }
}

/// Manually advanced clock for deterministic tests.
pub struct ManualClock {
    now_nanos: AtomicU64,
}

impl ManualClock {
    /// Clock frozen at the given instant.
    pub fn new(initial_nanos: u64) -> Self {
        Self {
            now_nanos: AtomicU64::new(initial_nanos),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, nanos: u64) {
        self.now_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, nanos: u64) {
        self.now_nanos.store(nanos, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.now_nanos.load(Ordering::Relaxed)
    }
}
