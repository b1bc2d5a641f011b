use std::fmt;

use glam::{Mat4, Vec4};

/// Perspective viewing volume in eye space.
///
/// `left`/`right`/`top`/`bottom` are measured on the near plane; `near` and
/// `far` are positive distances along -Z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

/// Reason a set of projection parameters was rejected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ProjectionError {
    /// At least one bound is NaN or infinite.
    NonFinite,
    /// `left == right`.
    DegenerateWidth,
    /// `top == bottom`.
    DegenerateHeight,
    /// `near == far`.
    DegenerateDepth,
    /// `near <= 0`.
    NearNotPositive { near: f32 },
    /// `far <= near`.
    FarNotBeyondNear { near: f32, far: f32 },
    /// Field of view outside the open interval `(0, 180)` degrees.
    FieldOfView { degrees: f32 },
    /// Aspect ratio not strictly positive.
    AspectRatio { aspect: f32 },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "frustum bounds must be finite"),
            Self::DegenerateWidth => write!(f, "frustum has zero width (left == right)"),
            Self::DegenerateHeight => write!(f, "frustum has zero height (top == bottom)"),
            Self::DegenerateDepth => write!(f, "frustum has zero depth (near == far)"),
            Self::NearNotPositive { near } => write!(f, "near plane must be positive, got {near}"),
            Self::FarNotBeyondNear { near, far } => {
                write!(f, "far plane ({far}) must lie beyond near plane ({near})")
            }
            Self::FieldOfView { degrees } => {
                write!(f, "field of view must be in (0, 180) degrees, got {degrees}")
            }
            Self::AspectRatio { aspect } => {
                write!(f, "aspect ratio must be positive, got {aspect}")
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

impl Frustum {
    #[inline]
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self { left, right, top, bottom, near, far }
    }

    /// Symmetric frustum described by a vertical field of view.
    ///
    /// `top = near * tan(fov / 2)`, `right = top * aspect`; the opposite bounds
    /// are mirrored. No validation; see [`Frustum::try_from_fov`].
    pub fn from_fov(field_of_view_deg: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let top = near * (field_of_view_deg.to_radians() * 0.5).tan();
        let right = top * aspect_ratio;
        Self::new(-right, right, top, -top, near, far)
    }

    /// Checked variant of [`Frustum::from_fov`].
    pub fn try_from_fov(
        field_of_view_deg: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, ProjectionError> {
        if !(field_of_view_deg > 0.0 && field_of_view_deg < 180.0) {
            return Err(ProjectionError::FieldOfView { degrees: field_of_view_deg });
        }
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(ProjectionError::AspectRatio { aspect: aspect_ratio });
        }

        let frustum = Self::from_fov(field_of_view_deg, aspect_ratio, near, far);
        frustum.validate()?;
        Ok(frustum)
    }

    /// Width of the near-plane window.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the near-plane window.
    #[inline]
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Checks that [`perspective`] yields a finite matrix for these bounds.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let all = [self.left, self.right, self.top, self.bottom, self.near, self.far];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(ProjectionError::NonFinite);
        }
        if self.width() == 0.0 {
            return Err(ProjectionError::DegenerateWidth);
        }
        if self.height() == 0.0 {
            return Err(ProjectionError::DegenerateHeight);
        }
        if self.far == self.near {
            return Err(ProjectionError::DegenerateDepth);
        }
        if self.near <= 0.0 {
            return Err(ProjectionError::NearNotPositive { near: self.near });
        }
        if self.far < self.near {
            return Err(ProjectionError::FarNotBeyondNear { near: self.near, far: self.far });
        }
        Ok(())
    }

    /// Validated projection matrix for this frustum.
    pub fn projection(&self) -> Result<Mat4, ProjectionError> {
        self.validate()?;
        Ok(perspective(self))
    }
}

/// Perspective projection for explicit frustum bounds.
///
/// Unchecked: degenerate bounds produce non-finite entries. Use
/// [`Frustum::projection`] when the input is not known to be valid.
pub fn perspective(frustum: &Frustum) -> Mat4 {
    let Frustum { left, right, top, bottom, near, far } = *frustum;

    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

/// Perspective projection from a vertical field of view (degrees).
///
/// Equivalent to `perspective(&Frustum::from_fov(..))`.
#[inline]
pub fn perspective_fov(field_of_view_deg: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
    perspective(&Frustum::from_fov(field_of_view_deg, aspect_ratio, near, far))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_mat_eq(a: Mat4, b: Mat4, eps: f32) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = eps);
        }
    }

    fn window_frustum() -> Frustum {
        Frustum::new(-320.0, 320.0, 240.0, -240.0, 0.1, 10.0)
    }

    // ── closed form ───────────────────────────────────────────────────────

    #[test]
    fn entries_match_closed_form() {
        let cases = [
            window_frustum(),
            Frustum::new(-1.0, 3.0, 2.0, -0.5, 0.5, 100.0),
            Frustum::new(-0.2, 0.1, 0.15, -0.05, 0.01, 2.0),
        ];

        for f in cases {
            let m = perspective(&f);
            let (l, r, t, b, n, fa) = (f.left, f.right, f.top, f.bottom, f.near, f.far);

            assert_abs_diff_eq!(m.col(0)[0], 2.0 * n / (r - l), epsilon = 1e-6);
            assert_abs_diff_eq!(m.col(1)[1], 2.0 * n / (t - b), epsilon = 1e-6);
            assert_abs_diff_eq!(m.col(2)[2], -(fa + n) / (fa - n), epsilon = 1e-6);
            assert_abs_diff_eq!(m.col(2)[0], (r + l) / (r - l), epsilon = 1e-6);
            assert_abs_diff_eq!(m.col(2)[1], (t + b) / (t - b), epsilon = 1e-6);
            assert_abs_diff_eq!(m.col(3)[2], -2.0 * fa * n / (fa - n), epsilon = 1e-6);
            assert_eq!(m.col(2)[3], -1.0);
            assert_eq!(m.col(3)[3], 0.0);

            // Everything off the documented entries is zero.
            for (col, row) in [(0, 1), (0, 2), (0, 3), (1, 0), (1, 2), (1, 3), (3, 0), (3, 1)] {
                assert_eq!(m.col(col)[row], 0.0, "entry ({row},{col})");
            }
        }
    }

    #[test]
    fn last_row_is_perspective_divide() {
        let m = perspective(&window_frustum());
        assert_eq!(m.row(3).to_array(), [0.0, 0.0, -1.0, 0.0]);
        assert!(m.is_finite());
    }

    // ── fov form ──────────────────────────────────────────────────────────

    #[test]
    fn fov_form_equals_general_form_on_derived_bounds() {
        let near = 0.1;
        let top = near * 45f32.to_radians().tan();
        let derived = Frustum::new(-top, top, top, -top, near, 10.0);

        assert_mat_eq(perspective_fov(90.0, 1.0, near, 10.0), perspective(&derived), 1e-6);
    }

    #[test]
    fn fov_form_matches_glam_gl_perspective() {
        for (fov, aspect) in [(90.0f32, 1.0f32), (60.0, 4.0 / 3.0), (30.0, 0.5)] {
            let ours = perspective_fov(fov, aspect, 0.1, 10.0);
            let glam = Mat4::perspective_rh_gl(fov.to_radians(), aspect, 0.1, 10.0);
            assert_mat_eq(ours, glam, 1e-4);
        }
    }

    #[test]
    fn from_fov_is_symmetric() {
        let f = Frustum::from_fov(60.0, 2.0, 1.0, 5.0);
        assert_eq!(f.left, -f.right);
        assert_eq!(f.bottom, -f.top);
        assert_abs_diff_eq!(f.right, 2.0 * f.top, epsilon = 1e-6);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn validate_accepts_window_frustum() {
        assert!(window_frustum().validate().is_ok());
        assert!(window_frustum().projection().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_bounds() {
        let mut f = window_frustum();
        f.right = f.left;
        assert_eq!(f.validate(), Err(ProjectionError::DegenerateWidth));

        let mut f = window_frustum();
        f.bottom = f.top;
        assert_eq!(f.validate(), Err(ProjectionError::DegenerateHeight));

        let mut f = window_frustum();
        f.far = f.near;
        assert_eq!(f.validate(), Err(ProjectionError::DegenerateDepth));
    }

    #[test]
    fn validate_rejects_bad_depth_range() {
        let mut f = window_frustum();
        f.near = 0.0;
        assert_eq!(f.validate(), Err(ProjectionError::NearNotPositive { near: 0.0 }));

        let mut f = window_frustum();
        f.far = 0.05;
        assert_eq!(
            f.validate(),
            Err(ProjectionError::FarNotBeyondNear { near: 0.1, far: 0.05 })
        );

        let mut f = window_frustum();
        f.top = f32::NAN;
        assert_eq!(f.validate(), Err(ProjectionError::NonFinite));
    }

    #[test]
    fn try_from_fov_rejects_out_of_range_inputs() {
        assert_eq!(
            Frustum::try_from_fov(180.0, 1.0, 0.1, 10.0),
            Err(ProjectionError::FieldOfView { degrees: 180.0 })
        );
        assert_eq!(
            Frustum::try_from_fov(0.0, 1.0, 0.1, 10.0),
            Err(ProjectionError::FieldOfView { degrees: 0.0 })
        );
        assert_eq!(
            Frustum::try_from_fov(90.0, -1.0, 0.1, 10.0),
            Err(ProjectionError::AspectRatio { aspect: -1.0 })
        );
        assert!(Frustum::try_from_fov(90.0, 1.0, 0.1, 10.0).is_ok());
    }
}
