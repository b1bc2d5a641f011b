use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of "seconds since start".
pub trait TimeSource {
    /// Seconds elapsed since the source was started.
    fn elapsed(&self) -> f64;
}

/// Wall-clock source backed by `Instant`.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl TimeSource for MonotonicClock {
    fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Synthetic source advanced by hand.
///
/// Clones share the same time value, so a test can keep a handle while the
/// clock itself is owned by a `FrameClock`.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now.get()
    }
}
