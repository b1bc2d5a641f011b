/// The swapchain image being drawn this frame plus its command encoder.
///
/// Hand it back to [`Gpu::submit`](super::Gpu::submit) promptly: the next
/// image cannot be acquired while this one is held.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Encoder and color view, borrowed together for one render pass.
    pub fn parts(&mut self) -> (&mut wgpu::CommandEncoder, &wgpu::TextureView) {
        (&mut self.encoder, &self.view)
    }
}
