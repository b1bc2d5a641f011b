use std::time::Duration;

use super::clock::{MonotonicClock, TimeSource};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Time elapsed since the clock source started, in seconds (unclamped).
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls. `elapsed` is reported as-is so that
/// time-derived animation stays tied to the wall clock.
#[derive(Debug, Clone)]
pub struct FrameClock<T: TimeSource = MonotonicClock> {
    source: T,
    last: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock<MonotonicClock> {
    /// Creates a wall-clock frame clock starting now.
    pub fn new() -> Self {
        Self::with_source(MonotonicClock::start())
    }
}

impl Default for FrameClock<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameClock<T> {
    /// Creates a clock over `source` with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation explosions after long stalls
    pub fn with_source(source: T) -> Self {
        Self::with_clamps(source, Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(source: T, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let last = source.elapsed();
        Self {
            source,
            last,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.source.elapsed();
        let raw = (now - self.last).max(0.0);
        let dt = raw.clamp(self.dt_min.as_secs_f64(), self.dt_max.as_secs_f64());

        self.last = now;

        let ft = FrameTime {
            dt: dt as f32,
            elapsed: now as f32,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
