use glam::{Mat4, Vec3};
use orbitview_common::CameraHandle;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// Creation parameters for a camera resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub projection: Projection,
    /// Viewport size in pixels.
    pub width: f32,
    pub height: f32,
    /// Vertical field of view. Also sizes the orthographic view volume.
    pub fov_degrees: f32,
    pub clip_near: f32,
    pub clip_far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            width: 1280.0,
            height: 720.0,
            fov_degrees: 60.0,
            clip_near: 0.1,
            clip_far: 10_000.0,
            position: Vec3::new(0.0, 0.0, -5.0),
            target: Vec3::ZERO,
        }
    }
}

/// Camera extrinsics: where it is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.target.is_finite() && self.position != self.target
    }
}

/// Narrow capability for anything that owns pose-settable cameras.
///
/// Camera controllers depend on this instead of a concrete render context
/// so they can be driven by a headless context in tests.
pub trait CameraRig {
    /// Current pose of the camera, or `None` if the handle is stale.
    fn camera_pose(&self, camera: CameraHandle) -> Option<CameraPose>;

    /// Write position and look-at target. Nothing else about the camera changes.
    fn set_camera_pose(
        &mut self,
        camera: CameraHandle,
        position: Vec3,
        look_at: Vec3,
    ) -> Result<(), RenderError>;
}

/// A camera resource owned by a render context.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.settings.position,
            target: self.settings.target,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) -> Result<(), RenderError> {
        if !pose.is_valid() {
            return Err(RenderError::InvalidPose);
        }
        self.settings.position = pose.position;
        self.settings.target = pose.target;
        Ok(())
    }

    /// Resize the viewport. Called by the owning layer on window resize.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.settings.width = width.max(1.0);
        self.settings.height = height.max(1.0);
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.settings.projection = projection;
    }

    pub fn aspect(&self) -> f32 {
        self.settings.width.max(1.0) / self.settings.height.max(1.0)
    }

    pub fn forward(&self) -> Vec3 {
        (self.settings.target - self.settings.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        // Looking straight along Y makes Y a degenerate up vector.
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.settings.position, self.settings.target, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let s = &self.settings;
        let fov = s.fov_degrees.to_radians();
        match s.projection {
            Projection::Perspective => Mat4::perspective_rh(fov, self.aspect(), s.clip_near, s.clip_far),
            Projection::Orthographic => {
                let distance = (s.target - s.position).length().max(s.clip_near);
                let half_h = distance * (fov * 0.5).tan();
                let half_w = half_h * self.aspect();
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, s.clip_near, s.clip_far)
            }
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = Camera::new(CameraSettings::default());
        assert_eq!(cam.pose().position.z, -5.0);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
        assert!(!vp.is_nan());
    }

    #[test]
    fn set_pose_rejects_degenerate() {
        let mut cam = Camera::new(CameraSettings::default());
        let bad = CameraPose {
            position: Vec3::ONE,
            target: Vec3::ONE,
        };
        assert!(matches!(cam.set_pose(bad), Err(RenderError::InvalidPose)));
        let nan = CameraPose {
            position: Vec3::new(f32::NAN, 0.0, 0.0),
            target: Vec3::ZERO,
        };
        assert!(cam.set_pose(nan).is_err());
        assert_eq!(cam.pose().position, Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn set_pose_keeps_projection() {
        let mut cam = Camera::new(CameraSettings {
            clip_far: 123.0,
            ..CameraSettings::default()
        });
        cam.set_pose(CameraPose {
            position: Vec3::new(0.0, 3.0, 3.0),
            target: Vec3::ZERO,
        })
        .unwrap();
        assert_eq!(cam.settings().clip_far, 123.0);
        assert_eq!(cam.settings().projection, Projection::Perspective);
    }

    #[test]
    fn view_matrix_straight_down_is_finite() {
        let mut cam = Camera::new(CameraSettings::default());
        cam.set_pose(CameraPose {
            position: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::ZERO,
        })
        .unwrap();
        assert!(!cam.view_matrix().is_nan());
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = Camera::new(CameraSettings::default());
        let clip = cam.view_projection().project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
    }

    #[test]
    fn orthographic_projection_is_finite() {
        let mut cam = Camera::new(CameraSettings::default());
        cam.set_projection(Projection::Orthographic);
        assert!(!cam.projection_matrix().is_nan());
    }
}
