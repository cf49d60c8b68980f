use jiff::{SignedDuration, Timestamp};
use std::sync::{Arc, Mutex, PoisonError};

/// Time source for a [`Snowflake`](crate::Snowflake).
///
/// The generator only looks at whole milliseconds of [`Clock::now`]. Readings
/// may go backwards; the generator copes by waiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Blocks the calling thread until `now()` has reached `target`.
    ///
    /// No timeout. A later `now()` may still read earlier than `target` if the
    /// clock is stepped back after this returns, so callers re-check the
    /// reading and wait again.
    fn wait_until(&self, target: Timestamp);
}

/// Wall clock backed by [`Timestamp::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn wait_until(&self, target: Timestamp) {
        // Busy-wait, re-reading the clock until it reaches the target.
        while Timestamp::now() < target {
            std::hint::spin_loop();
        }
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// hand the other to a generator. `wait_until` never blocks; it jumps the
/// clock forward to the target instead.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock to `now`, which may be in the past.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock by `delta`; a negative delta rewinds it.
    pub fn advance(&self, delta: SignedDuration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.checked_add(delta).unwrap_or(if delta.is_negative() {
            Timestamp::MIN
        } else {
            Timestamp::MAX
        });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_until(&self, target: Timestamp) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if target > *now {
            *now = target;
        }
    }
}
