//! Time sources for timeout enforcement.
//!
//! Engines read time only through [`Clock`], so tests can substitute a
//! [`ManualClock`] and control elapsed time exactly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can hand one clone to an
/// engine and advance another, for example from inside a fitness closure.
///
/// ```
/// use optimize_hub::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(to_nanos(by), Ordering::SeqCst);
    }

    /// Sets the absolute reading.
    pub fn set(&self, to: Duration) {
        self.nanos.store(to_nanos(to), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

fn to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// A start reading paired with a time budget.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Duration,
    timeout: Duration,
}

impl Deadline {
    /// Starts the budget at the clock's current reading.
    pub fn start(clock: &dyn Clock, timeout: Duration) -> Self {
        Self {
            start: clock.now(),
            timeout,
        }
    }

    pub fn elapsed(&self, clock: &dyn Clock) -> Duration {
        clock.now().saturating_sub(self.start)
    }

    /// `true` once elapsed time strictly exceeds the timeout.
    pub fn expired(&self, clock: &dyn Clock) -> bool {
        self.elapsed(clock) > self.timeout
    }
}
