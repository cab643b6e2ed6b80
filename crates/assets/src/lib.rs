//! Asset loading for the render context.
//!
//! Textures are decoded from disk, converted to RGBA8 and flipped so the
//! first row is the bottom of the image. Geometry uses packed RGBA8 normals
//! and tangents. Everything registered through [`AssetStore`] is identified
//! by a content hash, so identical data is uploaded once.

mod geometry;
mod pack;
mod store;
mod texture;

use std::path::PathBuf;

pub use geometry::cube_geometry;
pub use pack::{encode_normal_rgba8, pack_rgba8, to_unorm};
pub use store::{AssetEntry, AssetId, AssetKind, AssetStore};
pub use texture::TextureData;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("render context rejected asset: {0}")]
    Render(#[from] orbitview_render::RenderError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn crate_info() -> &'static str {
    "orbitview-assets v0.1.0"
}
