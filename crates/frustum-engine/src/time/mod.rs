//! Time subsystem.
//!
//! Animation is driven by wall-clock time since start, not by accumulated
//! frame deltas. The clock source is injectable so a frame can be reproduced
//! exactly in tests:
//! - `MonotonicClock` for the windowed runtime
//! - `ManualClock` for headless harnesses

mod clock;
mod frame_clock;

pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use frame_clock::{FrameClock, FrameTime};
