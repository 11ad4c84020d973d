//! Monotonic timestamp source.
//!
//! Record timestamps must be strictly increasing within a process, even
//! for back-to-back calls inside one clock tick. Ties are broken by
//! bumping past the last issued value; concurrent callers are serialized
//! through a single atomic, never a lock.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A strictly increasing millisecond clock.
///
/// The process-wide instance from [`MonotonicClock::global`] backs default
/// builders; tests inject their own instance to control time.
#[derive(Debug)]
pub struct MonotonicClock {
    last: AtomicI64,
}

impl MonotonicClock {
    /// Create a fresh clock. The first reading is at least the wall time.
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// The process-wide clock shared by all default builders.
    pub fn global() -> &'static MonotonicClock {
        static CLOCK: MonotonicClock = MonotonicClock::new();
        &CLOCK
    }

    /// Next timestamp: wall-clock milliseconds, bumped past every value
    /// this instance has already issued.
    pub fn now(&self) -> i64 {
        let wall = wall_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = wall.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(observed) => prev = observed,
            }
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

fn wall_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
