use wgpu::util::DeviceExt;

use crate::core::StartupError;
use crate::device::Scoped;
use crate::model::Vertex;

/// Vertex buffer holding the model geometry.
///
/// Uploaded once at startup; the buffer is destroyed when this is dropped.
pub struct MeshBuffer {
    vertices: Scoped<wgpu::Buffer>,
    count: u32,
}

impl MeshBuffer {
    pub fn upload(device: &wgpu::Device, vertices: &[Vertex]) -> Result<Self, StartupError> {
        if vertices.is_empty() {
            return Err(StartupError::Buffers("no vertex data to upload".into()));
        }
        let count = u32::try_from(vertices.len())
            .map_err(|_| StartupError::Buffers(format!("{} vertices exceed u32", vertices.len())))?;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frustum vertex buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::debug!("uploaded {count} vertices ({} bytes)", buffer.size());

        Ok(Self {
            vertices: Scoped::new("vertex buffer", buffer),
            count,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.vertices.slice(..)
    }
}
