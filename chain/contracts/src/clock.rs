//! Time source for timelock checks
//!
//! The hosting substrate decides what "now" is (block time). Production uses
//! wall-clock UTC; tests and simulations drive a manual clock.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Current time in unix seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall-clock UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    pub fn set(&self, time: i64) {
        self.now.store(time, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
