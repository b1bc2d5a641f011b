use std::fmt;

/// Fatal failure while bringing the pipeline up or while it runs.
///
/// Every variant stops the driver; it goes straight to shutdown and the
/// process exits with [`ExitStatus::Failure`](super::ExitStatus::Failure).
#[derive(Debug, Clone, PartialEq)]
pub enum StartupError {
    /// The platform event loop could not be created.
    EventLoop(String),
    /// Window creation failed.
    Window(String),
    /// GPU instance/adapter/device/surface setup failed.
    Context(String),
    /// WGSL compilation, validation or pipeline linking failed.
    Shader { log: String },
    /// Vertex data could not be uploaded.
    Buffers(String),
    /// The configured projection is degenerate.
    Projection(String),
    /// A frame hit an unrecoverable error (e.g. surface out of memory).
    Frame(String),
}

impl StartupError {
    /// Short stage name used in diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::EventLoop(_) => "event loop",
            Self::Window(_) => "window",
            Self::Context(_) => "gpu context",
            Self::Shader { .. } => "shader program",
            Self::Buffers(_) => "vertex buffers",
            Self::Projection(_) => "projection",
            Self::Frame(_) => "frame loop",
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shader { log } => write!(f, "{} failed:\n{log}", self.stage()),
            Self::EventLoop(msg)
            | Self::Window(msg)
            | Self::Context(msg)
            | Self::Buffers(msg)
            | Self::Projection(msg)
            | Self::Frame(msg) => write!(f, "{} failed: {msg}", self.stage()),
        }
    }
}

impl std::error::Error for StartupError {}
