//! Rendering Adapter: renderer-agnostic render context.
//!
//! The context owns every render resource (cameras, geometry, textures,
//! materials, shaders) and hands out copyable handles. Backends read the
//! context to draw a frame; controllers write camera poses through the
//! narrow [`CameraRig`] capability.
//!
//! # Invariants
//! - Handles never own the resource they name.
//! - Camera pose writers only touch position and look-at; projection,
//!   clip planes and viewport stay with the owning layer.

mod camera;
mod context;
mod error;
mod renderer;
mod resources;
mod scene;
mod settings;

pub use camera::{Camera, CameraPose, CameraRig, CameraSettings, Projection};
pub use context::{DebugTextLine, RenderContext, TextColor};
pub use error::RenderError;
pub use renderer::{Renderer, TextRenderer};
pub use resources::{
    Geometry, GeometryId, Material, MaterialId, Renderable, ShaderSource, Texture, TextureFormat,
    TextureId, Vertex,
};
pub use scene::DemoScene;
pub use settings::{RenderSettings, RendererKind};

pub fn crate_info() -> &'static str {
    "orbitview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
