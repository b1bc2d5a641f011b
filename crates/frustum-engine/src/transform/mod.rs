//! Transform library.
//!
//! Pure constructors for the matrices that make up a model/view/projection
//! chain. Everything here is stateless and GPU-agnostic.
//!
//! Conventions:
//! - matrices are `glam::Mat4`, column-major (uploaded as-is)
//! - right-handed eye space, camera looking down -Z
//! - projections follow the OpenGL clip convention (depth in `[-w, w]`)

mod affine;
mod projection;

pub use affine::{rotation, rotation_from_vector, translation};
pub use projection::{perspective, perspective_fov, Frustum, ProjectionError};
