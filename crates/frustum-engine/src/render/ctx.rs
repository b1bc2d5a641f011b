use crate::device::Gpu;

/// Device handles the render passes need, borrowed from [`Gpu`].
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
        }
    }
}

/// Where a pass records to: the frame's encoder and swapchain view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> From<(&'a mut wgpu::CommandEncoder, &'a wgpu::TextureView)> for RenderTarget<'a> {
    fn from((encoder, color_view): (&'a mut wgpu::CommandEncoder, &'a wgpu::TextureView)) -> Self {
        Self { encoder, color_view }
    }
}
