use glam::{Mat4, Vec3};

use crate::model::Model;
use crate::transform::{rotation_from_vector, translation};

/// Constant-rate spin about a fixed axis, with a bobbing depth offset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    /// Rotation axis. Normalized when the pose is built.
    pub axis: Vec3,
    /// Radians per second.
    pub angular_rate: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self { axis: Vec3::Z, angular_rate: 10.0 }
    }
}

/// Position and rotation vector for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Vec3,
}

impl Pose {
    /// Writes this pose into `model`, replacing its previous pose.
    pub fn apply(&self, model: &mut Model) {
        model.set_position(self.position);
        model.set_orientation(self.orientation);
    }
}

impl Spin {
    #[inline]
    pub fn angle(&self, elapsed_secs: f32) -> f32 {
        elapsed_secs * self.angular_rate
    }

    /// Pose at `angle`: depth `sin(angle / 2) - 1`, rotation `axis * angle`.
    ///
    /// A zero or non-finite axis is a configuration bug: debug builds assert,
    /// release builds keep the model unrotated.
    pub fn pose(&self, angle: f32) -> Pose {
        let unit = self.axis.try_normalize();
        debug_assert!(unit.is_some(), "spin axis must be non-zero and finite, got {}", self.axis);
        let axis = unit.unwrap_or(Vec3::ZERO);
        Pose {
            position: Vec3::new(0.0, 0.0, (0.5 * angle).sin() - 1.0),
            orientation: axis * angle,
        }
    }
}

/// `translation(position) * rotation(orientation)` for the model's pose.
pub fn model_matrix(model: &Model) -> Mat4 {
    translation(model.position()) * rotation_from_vector(model.orientation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::rotation;
    use approx::assert_abs_diff_eq;

    fn model() -> Model {
        Model::new(Vec3::ZERO, Vec3::ZERO, Vec::new())
    }

    #[test]
    fn angle_scales_with_rate() {
        let spin = Spin::default();
        assert_eq!(spin.angle(0.0), 0.0);
        assert_abs_diff_eq!(spin.angle(0.25), 2.5, epsilon = 1e-6);
    }

    #[test]
    fn pose_at_zero_is_one_unit_back() {
        let pose = Spin::default().pose(0.0);
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pose.orientation, Vec3::ZERO);
    }

    #[test]
    fn pose_bobs_between_minus_two_and_zero() {
        let spin = Spin::default();
        assert_abs_diff_eq!(spin.pose(std::f32::consts::PI).position.z, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spin.pose(3.0 * std::f32::consts::PI).position.z, -2.0, epsilon = 1e-6);
    }

    #[test]
    fn apply_replaces_model_pose() {
        let mut m = model();
        m.set_position(Vec3::splat(9.0));
        Spin::default().pose(1.0).apply(&mut m);

        assert_abs_diff_eq!(m.position().z, 0.5f32.sin() - 1.0, epsilon = 1e-6);
        assert_eq!(m.orientation(), Vec3::Z);
    }

    #[test]
    fn model_matrix_is_translation_times_rotation() {
        let mut m = model();
        Spin::default().pose(0.7).apply(&mut m);

        let expected = translation(m.position()) * rotation(Vec3::Z, 0.7);
        let got = model_matrix(&m);
        for (x, y) in got.to_cols_array().iter().zip(expected.to_cols_array().iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-5);
        }
    }

    #[test]
    fn non_unit_axis_is_normalized() {
        let spin = Spin { axis: Vec3::new(0.0, 0.0, 4.0), angular_rate: 1.0 };
        assert_eq!(spin.pose(2.0).orientation, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "spin axis must be non-zero")]
    fn zero_axis_asserts_in_debug() {
        Spin { axis: Vec3::ZERO, angular_rate: 1.0 }.pose(1.0);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn zero_axis_leaves_model_unrotated() {
        let pose = Spin { axis: Vec3::ZERO, angular_rate: 1.0 }.pose(1.0);
        assert_eq!(pose.orientation, Vec3::ZERO);
    }
}
