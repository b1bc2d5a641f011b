use std::ops::Deref;

/// A GPU object with an explicit release step.
pub trait GpuResource {
    /// Frees the underlying GPU memory. Called at most once by [`Scoped`].
    fn release(&mut self);
}

impl GpuResource for wgpu::Buffer {
    fn release(&mut self) {
        self.destroy();
    }
}

/// Scoped owner of a [`GpuResource`].
///
/// The resource is released exactly once when the guard is dropped, which
/// covers early returns during startup as well as normal teardown.
pub struct Scoped<R: GpuResource> {
    label: &'static str,
    resource: R,
}

impl<R: GpuResource> Scoped<R> {
    pub fn new(label: &'static str, resource: R) -> Self {
        log::debug!("acquired {label}");
        Self { label, resource }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<R: GpuResource> Deref for Scoped<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.resource
    }
}

impl<R: GpuResource> Drop for Scoped<R> {
    fn drop(&mut self) {
        self.resource.release();
        log::debug!("released {}", self.label);
    }
}
