//! Pipeline configuration.
//!
//! Everything the viewer needs to bring a frame up lives here as plain data
//! with defaults. Nothing is read from disk or the environment.

use glam::{Mat4, Vec3};
use winit::dpi::LogicalSize;

use crate::input::Key;
use crate::model::{Model, Vertex};
use crate::render::{ShaderSource, Spin};
use crate::transform::{Frustum, ProjectionError};

/// Window title and client-area size.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Logical size; winit scales it by the monitor's DPI factor.
    pub size: LogicalSize<u32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hello Triangle".to_string(),
            size: LogicalSize::new(640, 480),
        }
    }
}

/// How the projection matrix is described.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ProjectionConfig {
    /// Explicit near-plane bounds.
    Frustum(Frustum),
    /// Symmetric frustum from a vertical field of view in degrees.
    FieldOfView {
        degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::Frustum(Frustum::new(-320.0, 320.0, 240.0, -240.0, 0.1, 10.0))
    }
}

impl ProjectionConfig {
    pub fn frustum(&self) -> Result<Frustum, ProjectionError> {
        match *self {
            Self::Frustum(f) => {
                f.validate()?;
                Ok(f)
            }
            Self::FieldOfView { degrees, aspect, near, far } => {
                Frustum::try_from_fov(degrees, aspect, near, far)
            }
        }
    }

    /// Validated projection matrix.
    pub fn matrix(&self) -> Result<Mat4, ProjectionError> {
        self.frustum()?.projection()
    }
}

/// Full description of the rendered scene and its window.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub window: WindowConfig,
    pub shader: ShaderSource,
    pub vertices: Vec<Vertex>,
    pub initial_orientation: Vec3,
    pub initial_position: Vec3,
    pub projection: ProjectionConfig,
    pub spin: Spin,
    pub clear_color: wgpu::Color,
    pub quit_key: Key,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shader: ShaderSource::default(),
            vertices: vec![
                Vertex::new(-500.0, -500.0, 0.0),
                Vertex::new(500.0, -500.0, 0.0),
                Vertex::new(0.0, 500.0, 0.0),
            ],
            initial_orientation: Vec3::ZERO,
            initial_position: Vec3::ZERO,
            projection: ProjectionConfig::default(),
            spin: Spin::default(),
            clear_color: wgpu::Color::BLACK,
            quit_key: Key::Escape,
        }
    }
}

impl PipelineConfig {
    pub fn with_window(mut self, title: impl Into<String>, width: u32, height: u32) -> Self {
        self.window = WindowConfig {
            title: title.into(),
            size: LogicalSize::new(width, height),
        };
        self
    }

    pub fn with_shader(mut self, shader: ShaderSource) -> Self {
        self.shader = shader;
        self
    }

    pub fn with_vertices(mut self, vertices: impl IntoIterator<Item = Vertex>) -> Self {
        self.vertices = vertices.into_iter().collect();
        self
    }

    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_quit_key(mut self, key: Key) -> Self {
        self.quit_key = key;
        self
    }

    /// Model in its initial pose.
    pub fn model(&self) -> Model {
        Model::new(self.initial_orientation, self.initial_position, self.vertices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use winit::dpi::PhysicalSize;

    #[test]
    fn defaults_describe_hello_triangle() {
        let cfg = PipelineConfig::default();

        assert_eq!(cfg.window.title, "Hello Triangle");
        assert_eq!(cfg.window.size, LogicalSize::new(640, 480));
        assert_eq!(cfg.vertices.len(), 3);
        assert_eq!(cfg.vertices[2].position, [0.0, 500.0, 0.0]);
        assert_eq!(cfg.spin.angular_rate, 10.0);
        assert_eq!(cfg.quit_key, Key::Escape);
        assert_eq!(cfg.clear_color, wgpu::Color::BLACK);
    }

    #[test]
    fn default_projection_is_valid() {
        let m = PipelineConfig::default().projection.matrix().unwrap();
        assert_abs_diff_eq!(m.col(0)[0], 0.2 / 640.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.col(1)[1], 0.2 / 480.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_projection_is_rejected() {
        let flat = Frustum::new(1.0, 1.0, 1.0, -1.0, 0.1, 10.0);
        let cfg = PipelineConfig::default().with_projection(ProjectionConfig::Frustum(flat));
        assert_eq!(cfg.projection.matrix(), Err(ProjectionError::DegenerateWidth));

        let fov =
            ProjectionConfig::FieldOfView { degrees: 200.0, aspect: 1.0, near: 0.1, far: 10.0 };
        assert_eq!(fov.matrix(), Err(ProjectionError::FieldOfView { degrees: 200.0 }));
    }

    #[test]
    fn builders_replace_fields() {
        let cfg = PipelineConfig::default()
            .with_window("demo", 800, 600)
            .with_vertices([Vertex::new(0.0, 0.0, 0.0)])
            .with_quit_key(Key::Q)
            .with_spin(Spin { axis: Vec3::Y, angular_rate: 1.0 });

        assert_eq!(cfg.window.title, "demo");
        assert_eq!(cfg.window.size, LogicalSize::new(800, 600));
        assert_eq!(cfg.model().vertex_count(), 1);
        assert_eq!(cfg.quit_key, Key::Q);
        assert_eq!(cfg.spin.axis, Vec3::Y);
    }

    #[test]
    fn window_size_scales_with_dpi() {
        let size = WindowConfig::default().size;
        let physical: PhysicalSize<u32> = size.to_physical(2.0);
        assert_eq!(physical, PhysicalSize::new(1280, 960));
    }
}
