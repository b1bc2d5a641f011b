//! Application driver core.
//!
//! Platform-independent pieces of the driver: lifecycle stages, the close
//! flag, startup errors and the per-frame loop step. The winit runtime in
//! `crate::window` is a thin shell around these.

mod close;
mod driver;
mod error;
mod lifecycle;

pub use close::CloseFlag;
pub use driver::{Driver, LoopControl};
pub use error::StartupError;
pub use lifecycle::{ExitStatus, Lifecycle, LifecycleError, Stage};
