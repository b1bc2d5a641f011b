/// Parameters for bringing up the GPU context.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format if the surface offers one. Off by default so
    /// shader output colours reach the screen unconverted.
    pub prefer_srgb: bool,

    /// `Fifo` (vsync) paces the render loop to the display.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; falls back to the first supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub backends: wgpu::Backends,

    /// Device limits. Downlevel defaults cover GL/WebGL-class adapters.
    pub required_limits: wgpu::Limits,

    /// Frames the presentation engine may queue (hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            backends: wgpu::Backends::all(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
