use glam::Mat4;

use super::animation::{model_matrix, Spin};
use super::backend::{DrawBackend, Primitive};
use crate::config::PipelineConfig;
use crate::core::StartupError;
use crate::model::Model;

pub const MODEL_UNIFORM: &str = "model";
pub const VIEW_UNIFORM: &str = "view";
pub const PROJECTION_UNIFORM: &str = "projection";

const SLOTS: [&str; 3] = [MODEL_UNIFORM, VIEW_UNIFORM, PROJECTION_UNIFORM];

/// Matrices computed for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameMatrices {
    pub angle: f32,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Per-frame animation, transform and draw step.
///
/// Holds everything that does not change between frames: the spin, the view
/// (identity) and the projection computed at startup.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    spin: Spin,
    view: Mat4,
    projection: Mat4,
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    warned: [bool; SLOTS.len()],
}

impl RenderLoop {
    pub fn new(spin: Spin, projection: Mat4) -> Self {
        Self {
            spin,
            view: Mat4::IDENTITY,
            projection,
            warned: [false; SLOTS.len()],
        }
    }

    /// Validates the configured projection and builds the loop around it.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, StartupError> {
        let projection = config
            .projection
            .matrix()
            .map_err(|e| StartupError::Projection(e.to_string()))?;
        log::info!("projection matrix: {projection:?}");
        Ok(Self::new(config.spin, projection))
    }

    /// Animates `model` for `elapsed` seconds, uploads the three matrices and
    /// draws the model's vertices.
    ///
    /// Uniforms the backend cannot resolve are skipped.
    pub fn render_frame<B: DrawBackend>(
        &mut self,
        model: &mut Model,
        elapsed: f32,
        backend: &mut B,
    ) -> FrameMatrices {
        let angle = self.spin.angle(elapsed);
        self.spin.pose(angle).apply(model);

        let frame = FrameMatrices {
            angle,
            model: model_matrix(model),
            view: self.view,
            projection: self.projection,
        };

        let values = [frame.model, frame.view, frame.projection];
        for (slot, (name, value)) in SLOTS.iter().zip(values.iter()).enumerate() {
            match backend.uniform_location(name) {
                Some(location) => backend.set_uniform_mat4(location, value),
                None => self.note_miss(slot, name),
            }
        }

        backend.draw(Primitive::Triangles, 0..model.vertex_count());

        log::trace!("frame angle={:.3} model={:?}", frame.angle, frame.model);
        frame
    }

    #[cfg(debug_assertions)]
    fn note_miss(&mut self, slot: usize, name: &str) {
        if !self.warned[slot] {
            self.warned[slot] = true;
            log::warn!("uniform `{name}` not found in shader program; upload skipped");
        }
    }

    #[cfg(not(debug_assertions))]
    fn note_miss(&mut self, _slot: usize, _name: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vertex;
    use crate::render::backend::{DrawCall, HeadlessBackend};
    use crate::render::uniforms::UniformLayout;
    use crate::transform::Frustum;
    use approx::assert_abs_diff_eq;
    use glam::{Vec3, Vec4};

    fn full_layout() -> UniformLayout {
        UniformLayout::from_members(
            192,
            [(MODEL_UNIFORM, 0), (VIEW_UNIFORM, 64), (PROJECTION_UNIFORM, 128)],
        )
    }

    fn triangle() -> Model {
        Model::new(
            Vec3::ZERO,
            Vec3::ZERO,
            vec![
                Vertex::new(-500.0, -500.0, 0.0),
                Vertex::new(500.0, -500.0, 0.0),
                Vertex::new(0.0, 500.0, 0.0),
            ],
        )
    }

    fn projection() -> Mat4 {
        Frustum::new(-320.0, 320.0, 240.0, -240.0, 0.1, 10.0)
            .projection()
            .unwrap()
    }

    // ── per-frame matrices ────────────────────────────────────────────────

    #[test]
    fn first_frame_model_is_pure_translation() {
        let mut rl = RenderLoop::new(Spin::default(), projection());
        let mut model = triangle();
        let mut backend = HeadlessBackend::new(full_layout());

        let frame = rl.render_frame(&mut model, 0.0, &mut backend);

        let expected = Mat4::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(0.0, 0.0, -1.0, 1.0));
        assert_eq!(frame.angle, 0.0);
        assert_eq!(frame.model, expected);
        assert_eq!(backend.uniform(MODEL_UNIFORM), Some(expected));
        assert_eq!(backend.uniform(VIEW_UNIFORM), Some(Mat4::IDENTITY));
        assert_eq!(backend.uniform(PROJECTION_UNIFORM), Some(projection()));
        assert_eq!(
            backend.draws(),
            &[DrawCall { primitive: Primitive::Triangles, vertices: 0..3 }]
        );
    }

    #[test]
    fn model_pose_tracks_elapsed_time() {
        let mut rl = RenderLoop::new(Spin::default(), projection());
        let mut model = triangle();
        let mut backend = HeadlessBackend::new(full_layout());

        let frame = rl.render_frame(&mut model, 0.1, &mut backend);

        assert_abs_diff_eq!(frame.angle, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(model.orientation().z, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(model.position().z, 0.5f32.sin() - 1.0, epsilon = 1e-6);

        // Translation column carries the bobbing depth.
        assert_abs_diff_eq!(frame.model.w_axis.z, model.position().z, epsilon = 1e-6);
        // Rotation about Z leaves the Z axis alone.
        for (got, want) in frame.model.z_axis.to_array().iter().zip(Vec4::Z.to_array().iter()) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-6);
        }
    }

    #[test]
    fn every_frame_issues_one_draw() {
        let mut rl = RenderLoop::new(Spin::default(), projection());
        let mut model = triangle();
        let mut backend = HeadlessBackend::new(full_layout());

        for i in 0..5 {
            rl.render_frame(&mut model, i as f32 / 60.0, &mut backend);
        }
        assert_eq!(backend.draws().len(), 5);
    }

    // ── uniform misses ────────────────────────────────────────────────────

    #[test]
    fn missing_uniform_skips_upload_but_still_draws() {
        let mut rl = RenderLoop::new(Spin::default(), projection());
        let mut model = triangle();
        let layout =
            UniformLayout::from_members(128, [(MODEL_UNIFORM, 0), (PROJECTION_UNIFORM, 64)]);
        let mut backend = HeadlessBackend::new(layout);

        rl.render_frame(&mut model, 0.0, &mut backend);
        rl.render_frame(&mut model, 0.5, &mut backend);

        assert_eq!(backend.uniform(VIEW_UNIFORM), None);
        assert_eq!(backend.uniform(PROJECTION_UNIFORM), Some(projection()));
        assert_eq!(backend.draws().len(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    fn miss_is_noted_once_per_slot() {
        let mut rl = RenderLoop::new(Spin::default(), projection());
        let mut model = triangle();
        let mut backend = HeadlessBackend::new(UniformLayout::empty());

        rl.render_frame(&mut model, 0.0, &mut backend);
        assert_eq!(rl.warned, [true; 3]);
        rl.render_frame(&mut model, 0.1, &mut backend);
        assert_eq!(rl.warned, [true; 3]);
    }
}
