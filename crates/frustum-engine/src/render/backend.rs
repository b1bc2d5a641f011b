use std::ops::Range;

use glam::Mat4;

use super::uniforms::{UniformBlock, UniformLayout, UniformLocation};

/// Primitive assembly mode for a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Primitive {
    #[default]
    Triangles,
}

impl Primitive {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// Sink for one frame's uniform uploads and draw calls.
///
/// The render loop only talks to this trait. The wgpu pass implements it for
/// the window; [`HeadlessBackend`] records calls without a GPU.
pub trait DrawBackend {
    /// Resolves a matrix uniform by name. `None` if the program has no such member.
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4);

    fn draw(&mut self, primitive: Primitive, vertices: Range<u32>);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub vertices: Range<u32>,
}

/// Backend that stages uniforms in memory and records draws.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    layout: UniformLayout,
    block: UniformBlock,
    draws: Vec<DrawCall>,
}

impl HeadlessBackend {
    pub fn new(layout: UniformLayout) -> Self {
        let block = UniformBlock::new(layout.size());
        Self { layout, block, draws: Vec::new() }
    }

    /// Current value of a named matrix, if the layout has it.
    pub fn uniform(&self, name: &str) -> Option<Mat4> {
        self.block.read_mat4(self.layout.location(name)?)
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Forgets recorded draws; uniform values are kept.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl DrawBackend for HeadlessBackend {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.layout.location(name)
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        self.block.write_mat4(location, value);
    }

    fn draw(&mut self, primitive: Primitive, vertices: Range<u32>) {
        self.draws.push(DrawCall { primitive, vertices });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_uniforms_and_draws() {
        let layout = UniformLayout::from_members(128, [("a", 0), ("b", 64)]);
        let mut backend = HeadlessBackend::new(layout);
        let b = backend.uniform_location("b").unwrap();
        let m = Mat4::from_scale(glam::Vec3::splat(2.0));

        backend.set_uniform_mat4(b, &m);
        backend.draw(Primitive::Triangles, 0..3);

        assert_eq!(backend.uniform("b"), Some(m));
        assert_eq!(backend.uniform("a"), Some(Mat4::ZERO));
        assert_eq!(
            backend.draws(),
            &[DrawCall { primitive: Primitive::Triangles, vertices: 0..3 }]
        );

        backend.clear_draws();
        assert!(backend.draws().is_empty());
        assert_eq!(backend.uniform("b"), Some(m));
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let backend = HeadlessBackend::new(UniformLayout::empty());
        assert_eq!(backend.uniform_location("model"), None);
        assert_eq!(backend.uniform("model"), None);
    }

    #[test]
    fn triangles_map_to_triangle_list() {
        assert_eq!(Primitive::Triangles.topology(), wgpu::PrimitiveTopology::TriangleList);
    }
}
