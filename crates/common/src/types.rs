use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to a camera resource owned by a render context.
///
/// Copying a handle never copies the camera; the context that created it
/// decides its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CameraHandle(pub Uuid);

impl CameraHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CameraHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a renderable (geometry + material pair) in a render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderableId(pub Uuid);

impl RenderableId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RenderableId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}
