use crate::core::LoopControl;

/// What the frame loop does after `get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface lost or outdated and configured again; try the next frame.
    Reconfigured,
    /// Timeout or driver hiccup; drop this frame only.
    SkipFrame,
    /// Out of memory; stop the loop.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn loop_control(self) -> LoopControl {
        match self {
            Self::Reconfigured | Self::SkipFrame => LoopControl::Continue,
            Self::Fatal => LoopControl::Exit,
        }
    }
}
