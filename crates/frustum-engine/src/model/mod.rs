//! Model state.
//!
//! Pose and geometry of the single rendered object. The driver owns the
//! `Model`; the render loop borrows it mutably for the duration of a frame.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One vertex as laid out in the GPU vertex buffer (`@location(0)`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl From<Vec3> for Vertex {
    fn from(v: Vec3) -> Self {
        Self { position: v.to_array() }
    }
}

/// Object pose plus model-space vertex data.
///
/// `orientation` is a rotation vector: unit axis scaled by the angle in
/// radians. The zero vector means no rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    orientation: Vec3,
    position: Vec3,
    vertices: Vec<Vertex>,
}

impl Model {
    pub fn new(orientation: Vec3, position: Vec3, vertices: Vec<Vertex>) -> Self {
        Self { orientation, position, vertices }
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn orientation_mut(&mut self) -> &mut Vec3 {
        &mut self.orientation
    }

    pub fn position_mut(&mut self) -> &mut Vec3 {
        &mut self.position
    }

    #[inline]
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices, as passed to the draw call.
    pub fn vertex_count(&self) -> u32 {
        draw_count(self.vertices.len())
    }
}

/// Vertex count as a draw-range bound. Saturates at `u32::MAX`; meshes that
/// large never get this far because the upload rejects them.
fn draw_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
