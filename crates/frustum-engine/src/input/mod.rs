//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `KeyEvent`s.

mod types;

pub use types::{Key, KeyEvent, KeyState};
