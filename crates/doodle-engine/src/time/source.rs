use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Injected monotonic time capability.
///
/// `now()` is an offset from an arbitrary per-source origin; only differences
/// between readings are meaningful.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Production time source backed by `Instant`.
#[derive(Debug)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-cranked time source for deterministic tests.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and hand another to the clock under test.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
