use std::fmt;

use super::error::StartupError;

/// Driver lifecycle stage.
///
/// Startup walks the stages in declaration order up to `Running`. Any startup
/// failure jumps straight to `ShuttingDown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Uninitialized,
    WindowReady,
    ContextReady,
    ShadersReady,
    BuffersReady,
    Running,
    ShuttingDown,
    Terminated,
}

impl Stage {
    /// Stage that follows `self` during startup, if any.
    pub fn next(self) -> Option<Stage> {
        match self {
            Self::Uninitialized => Some(Self::WindowReady),
            Self::WindowReady => Some(Self::ContextReady),
            Self::ContextReady => Some(Self::ShadersReady),
            Self::ShadersReady => Some(Self::BuffersReady),
            Self::BuffersReady => Some(Self::Running),
            Self::Running | Self::ShuttingDown | Self::Terminated => None,
        }
    }

    /// True while startup is still in progress.
    pub fn is_initializing(self) -> bool {
        matches!(
            self,
            Self::Uninitialized
                | Self::WindowReady
                | Self::ContextReady
                | Self::ShadersReady
                | Self::BuffersReady
        )
    }

    pub fn can_transition_to(self, to: Stage) -> bool {
        if self.next() == Some(to) {
            return true;
        }
        match (self, to) {
            (from, Self::ShuttingDown) if from.is_initializing() => true,
            (Self::Running, Self::Running | Self::ShuttingDown) => true,
            (Self::ShuttingDown, Self::Terminated) => true,
            _ => false,
        }
    }
}

/// Rejected stage transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LifecycleError {
    pub from: Stage,
    pub to: Stage,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal lifecycle transition {:?} -> {:?}", self.from, self.to)
    }
}

impl std::error::Error for LifecycleError {}

/// Process outcome reported once the driver terminates.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitStatus {
    /// Clean teardown after a user-initiated close.
    Success,
    /// Startup failed, or the frame loop hit a fatal error.
    Failure,
}

impl ExitStatus {
    /// Process exit code: `0` on success, `-1` on failure.
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => -1,
        }
    }
}

/// Stage tracker plus the startup failure, if one occurred.
#[derive(Debug)]
pub struct Lifecycle {
    stage: Stage,
    failure: Option<StartupError>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self { stage: Stage::Uninitialized, failure: None }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn failure(&self) -> Option<&StartupError> {
        self.failure.as_ref()
    }

    pub fn advance(&mut self, to: Stage) -> Result<(), LifecycleError> {
        if !self.stage.can_transition_to(to) {
            return Err(LifecycleError { from: self.stage, to });
        }
        self.stage = to;
        Ok(())
    }

    /// Records a startup or frame failure and moves to `ShuttingDown`.
    ///
    /// Only the first failure is kept.
    pub fn fail(&mut self, err: StartupError) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        if self.stage != Stage::Terminated {
            self.stage = Stage::ShuttingDown;
        }
    }

    /// Moves to `ShuttingDown`. Idempotent.
    pub fn shutdown(&mut self) {
        if matches!(self.stage, Stage::ShuttingDown | Stage::Terminated) {
            return;
        }
        if self.stage.is_initializing() && self.failure.is_none() {
            // Stopping before reaching `Running` means startup never completed.
            self.failure = Some(StartupError::EventLoop(format!(
                "event loop stopped during startup ({:?})",
                self.stage
            )));
        }
        self.stage = Stage::ShuttingDown;
    }

    /// Moves to `Terminated` and reports the exit status.
    pub fn terminate(&mut self) -> ExitStatus {
        self.shutdown();
        self.stage = Stage::Terminated;
        if self.failure.is_some() {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
