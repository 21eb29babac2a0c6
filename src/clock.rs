//! Wall-clock sources for the countdown engine.
//!
//! The engine never reads ambient time. It asks a [`Clock`] it was handed at
//! construction, which keeps deadline arithmetic deterministic in tests and
//! lets embedders substitute their own time source.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// Supplies the current wall-clock time on demand.
///
/// Implementations should be monotonically non-decreasing in practice, but
/// the engine tolerates backward jumps by clamping negative remaining time
/// to zero rather than underflowing.
pub trait Clock {
    /// Returns the current wall-clock time.
    fn now(&self) -> SystemTime;
}

/// The default clock, backed by [`SystemTime::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A hand-advanced clock for deterministic countdowns.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// while the engine holds another and move time explicitly:
///
/// ```rust
/// use countdown_widgets::clock::{Clock, ManualClock};
/// use std::time::{Duration, SystemTime};
///
/// let clock = ManualClock::new(SystemTime::UNIX_EPOCH);
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), SystemTime::UNIX_EPOCH + Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<SystemTime>>,
}

impl ManualClock {
    /// Creates a manual clock pinned to `start`.
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }

    /// Pins the clock to an absolute instant, forward or backward.
    pub fn set(&self, to: SystemTime) {
        *self.now.lock().unwrap() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().unwrap()
    }
}
