//! GPU rendering subsystem.
//!
//! The per-frame step lives in [`RenderLoop`]: it animates the model, computes
//! the model/view/projection matrices and hands them to a [`DrawBackend`].
//! [`TrianglePass`] is the wgpu backend; [`HeadlessBackend`] records the same
//! calls in memory.
//!
//! Convention:
//! - Matrices are column-major and follow the GL clip-space depth range.
//! - The vertex shader remaps depth to wgpu's `[0, w]` range.

mod animation;
mod backend;
mod ctx;
mod frame_loop;
mod mesh;
mod shader;
mod uniforms;

pub use animation::{model_matrix, Pose, Spin};
pub use backend::{DrawBackend, DrawCall, HeadlessBackend, Primitive};
pub use ctx::{RenderCtx, RenderTarget};
pub use frame_loop::{FrameMatrices, RenderLoop, MODEL_UNIFORM, PROJECTION_UNIFORM, VIEW_UNIFORM};
pub use mesh::MeshBuffer;
pub use shader::{CompiledShader, ShaderProgram, ShaderSource, TrianglePass};
pub use uniforms::{UniformBlock, UniformLayout, UniformLocation, MAT4_SIZE};
