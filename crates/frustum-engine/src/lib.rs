//! Frustum engine crate.
//!
//! Renders a single animated triangle through a model/view/projection chain.
//! The transform library, render loop and driver are usable without a window;
//! `window::Runtime` ties them to winit and wgpu.

pub mod config;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod model;
pub mod render;
pub mod time;
pub mod transform;
pub mod window;
