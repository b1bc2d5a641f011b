use super::close::CloseFlag;
use super::error::StartupError;
use super::lifecycle::{ExitStatus, Lifecycle, LifecycleError, Stage};

/// Control directive returned by a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Platform-independent frame-loop bookkeeping.
///
/// Owns the lifecycle, the close flag and the frame counter. The windowed
/// runtime calls [`Driver::frame`] once per redraw; headless harnesses can do
/// the same in a plain `loop`.
#[derive(Debug, Default)]
pub struct Driver {
    lifecycle: Lifecycle,
    close: CloseFlag,
    frames: u64,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the close flag; hand it to input callbacks.
    pub fn close_flag(&self) -> CloseFlag {
        self.close.clone()
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.lifecycle.stage()
    }

    pub fn failure(&self) -> Option<&StartupError> {
        self.lifecycle.failure()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn advance(&mut self, to: Stage) -> Result<(), LifecycleError> {
        self.lifecycle.advance(to)?;
        log::debug!("lifecycle -> {to:?}");
        Ok(())
    }

    /// Completes a startup step: advances to `stage` on success, records the
    /// failure and shuts down otherwise.
    pub fn startup_step<T>(&mut self, stage: Stage, result: Result<T, StartupError>) -> Option<T> {
        let value = self.require(result)?;
        match self.advance(stage) {
            Ok(()) => Some(value),
            Err(e) => {
                self.fail(StartupError::EventLoop(e.to_string()));
                None
            }
        }
    }

    /// Like [`startup_step`](Self::startup_step) but stays in the current stage.
    pub fn require<T>(&mut self, result: Result<T, StartupError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    pub fn fail(&mut self, err: StartupError) {
        log::error!("{err}");
        self.lifecycle.fail(err);
    }

    /// Runs one frame unless the loop should stop.
    ///
    /// The close flag is checked before `render` is invoked, so a close request
    /// set during frame `n` stops the loop at frame `n + 1` without rendering.
    /// `render` returning `Exit` means the frame failed fatally: the failure is
    /// recorded and the driver shuts down, so termination reports
    /// [`ExitStatus::Failure`]. Only the close flag leads to a clean exit.
    pub fn frame<F>(&mut self, render: F) -> LoopControl
    where
        F: FnOnce() -> LoopControl,
    {
        if self.stage() != Stage::Running {
            return LoopControl::Exit;
        }

        if self.close.is_set() {
            log::info!("close requested after {} frames", self.frames);
            self.lifecycle.shutdown();
            return LoopControl::Exit;
        }

        let control = render();
        self.frames += 1;

        if control == LoopControl::Exit {
            self.fail(StartupError::Frame(format!(
                "render aborted at frame {}",
                self.frames
            )));
        }

        control
    }

    /// Enters `ShuttingDown`. Idempotent.
    pub fn shutdown(&mut self) {
        self.lifecycle.shutdown();
    }

    /// Enters `Terminated` and reports the process outcome.
    pub fn terminate(&mut self) -> ExitStatus {
        let status = self.lifecycle.terminate();
        log::debug!("lifecycle -> Terminated ({status:?})");
        status
    }
}
