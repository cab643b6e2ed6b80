use orbitview_common::{CameraHandle, RenderableId};
use std::path::PathBuf;

use crate::resources::{GeometryId, MaterialId, TextureId};

/// Errors from render context operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("camera not found: {0:?}")]
    CameraNotFound(CameraHandle),
    #[error("renderable not found: {0:?}")]
    RenderableNotFound(RenderableId),
    #[error("geometry not found: {0:?}")]
    GeometryNotFound(GeometryId),
    #[error("texture not found: {0:?}")]
    TextureNotFound(TextureId),
    #[error("material not found: {0:?}")]
    MaterialNotFound(MaterialId),
    #[error("shader not loaded: {0}")]
    ShaderNotFound(String),
    #[error("texture data is {actual} bytes, expected {expected}")]
    TextureSize { expected: usize, actual: usize },
    #[error("invalid camera pose: position and look-at must be finite and distinct")]
    InvalidPose,
    #[error("failed to read shader {path}: {source}")]
    ShaderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
