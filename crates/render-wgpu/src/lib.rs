//! wgpu render backend.
//!
//! Draws a grid floor and every renderable in a [`RenderContext`] through
//! one of its cameras. GPU copies of geometry and textures are created the
//! first frame they are seen; the mesh pipeline is rebuilt whenever the
//! context's shader generation changes.
//!
//! # Invariants
//! - The backend never writes camera poses.
//! - Context resources are append-only, so GPU caches are indexed by id.
//!
//! [`RenderContext`]: orbitview_render::RenderContext

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
pub use shaders::{GRID_SHADER, MESH_SHADER, UBER_SHADER_NAME};
