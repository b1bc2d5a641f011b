use glam::{Mat3, Mat4, Vec3};

/// Returns the identity matrix with its translation column set to `offset`.
#[inline]
pub fn translation(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// Returns a rotation of `angle` radians about `axis`.
///
/// The axis does not need to be unit length; it is normalized here. A zero or
/// non-finite axis has no defined rotation: debug builds assert, release builds
/// return the identity.
pub fn rotation(axis: Vec3, angle: f32) -> Mat4 {
    let unit = axis.try_normalize();
    debug_assert!(unit.is_some(), "rotation axis must be non-zero and finite, got {axis}");
    let Some(unit) = unit else {
        return Mat4::IDENTITY;
    };

    Mat4::from_mat3(Mat3::from_axis_angle(unit, angle))
}

/// Converts a rotation vector (axis scaled by angle) into a rotation matrix.
///
/// The zero vector is the identity rotation.
pub fn rotation_from_vector(v: Vec3) -> Mat4 {
    match v.try_normalize() {
        Some(axis) => Mat4::from_mat3(Mat3::from_axis_angle(axis, v.length())),
        None => Mat4::IDENTITY,
    }
}
