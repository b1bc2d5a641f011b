//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer and
//! the frame driver in `crate::core`.

mod runtime;

pub use runtime::Runtime;
