use glam::{Vec2, Vec3};
use orbitview_common::CameraHandle;
use orbitview_input::{InputEvent, PointerButton};
use orbitview_render::{CameraPose, CameraRig};

use crate::settings::OrbitSettings;

/// Unit vector from the orbit target towards the camera.
///
/// `yaw = 0, pitch = 0` points down -Z; positive pitch raises the camera.
pub fn orbit_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(cp * sy, sp, -cp * cy)
}

/// Camera position for an orbit state.
pub fn pose_position(distance: f32, yaw: f32, pitch: f32, target: Vec3) -> Vec3 {
    target + orbit_direction(yaw, pitch) * distance
}

/// Move `current` towards `target` by fraction `t`, landing exactly on it at `t >= 1`.
///
/// A step that rounds back to `current` or past `target` snaps to `target`,
/// so the gap always shrinks and reaches zero.
fn approach(current: f32, target: f32, t: f32) -> f32 {
    if t >= 1.0 {
        return target;
    }
    if t <= 0.0 {
        return current;
    }
    let next = current + (target - current) * t;
    if next == current || (target - next) * (target - current) <= 0.0 {
        target
    } else {
        next
    }
}

/// Orbit camera driven by pointer drag, pan and scroll.
///
/// Input sets `target_yaw`/`target_pitch` instantly; [`on_update`] eases the
/// rendered angles towards them and writes the resulting pose into the
/// camera. Dragging right increases yaw, dragging down increases pitch.
///
/// [`on_update`]: OrbitCameraController::on_update
#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    camera: CameraHandle,
    settings: OrbitSettings,
    pointer_engaged: bool,
    panning: bool,
    last_pointer: Vec2,
    distance: f32,
    yaw: f32,
    pitch: f32,
    target_yaw: f32,
    target_pitch: f32,
    target: Vec3,
    position: Vec3,
}

impl OrbitCameraController {
    /// Controller for `camera` with default tuning, starting from the
    /// camera's current pose when the rig reports one.
    pub fn new<R: CameraRig + ?Sized>(rig: &R, camera: CameraHandle) -> Self {
        Self::from_rig(rig, camera, OrbitSettings::default())
    }

    /// Like [`new`](Self::new) with explicit tuning. The initial state in
    /// `settings` is only used when the rig has no usable pose.
    pub fn from_rig<R: CameraRig + ?Sized>(
        rig: &R,
        camera: CameraHandle,
        settings: OrbitSettings,
    ) -> Self {
        let mut controller = Self::with_settings(camera, settings);
        if let Some(pose) = rig.camera_pose(camera).filter(CameraPose::is_valid) {
            controller.adopt_pose(pose);
        }
        controller
    }

    /// Controller whose initial state comes entirely from `settings`.
    pub fn with_settings(camera: CameraHandle, settings: OrbitSettings) -> Self {
        let settings = settings.sanitized();
        let mut controller = Self {
            camera,
            settings,
            pointer_engaged: false,
            panning: false,
            last_pointer: Vec2::ZERO,
            distance: settings.distance,
            yaw: settings.yaw,
            pitch: settings.pitch,
            target_yaw: settings.yaw,
            target_pitch: settings.pitch,
            target: settings.target,
            position: Vec3::ZERO,
        };
        controller.sync_position();
        controller
    }

    fn adopt_pose(&mut self, pose: CameraPose) {
        let offset = pose.position - pose.target;
        let dir = offset.normalize_or_zero();
        self.target = pose.target;
        self.distance = self.clamp_distance(offset.length());
        self.yaw = dir.x.atan2(-dir.z);
        self.pitch = self.clamp_pitch(dir.y.clamp(-1.0, 1.0).asin());
        self.target_yaw = self.yaw;
        self.target_pitch = self.pitch;
        self.sync_position();
        tracing::debug!(
            distance = self.distance,
            yaw = self.yaw,
            pitch = self.pitch,
            "orbit camera adopted existing pose"
        );
    }

    /// React to an input event. Events other than pointer and scroll input
    /// are ignored, and nothing is consumed.
    pub fn on_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerPressed { button, x, y } => {
                let pos = Vec2::new(x, y);
                if !pos.is_finite() {
                    return;
                }
                match button {
                    PointerButton::Primary => {
                        self.pointer_engaged = true;
                        self.last_pointer = pos;
                    }
                    PointerButton::Secondary | PointerButton::Middle => {
                        self.panning = true;
                        self.last_pointer = pos;
                    }
                    PointerButton::Other(_) => {}
                }
            }
            InputEvent::PointerReleased { button, .. } => match button {
                PointerButton::Primary => self.pointer_engaged = false,
                PointerButton::Secondary | PointerButton::Middle => self.panning = false,
                PointerButton::Other(_) => {}
            },
            InputEvent::PointerMoved { x, y } => self.pointer_moved(Vec2::new(x, y)),
            InputEvent::Scroll { delta } => self.zoom(delta),
            _ => {}
        }
    }

    fn pointer_moved(&mut self, pos: Vec2) {
        if !(self.pointer_engaged || self.panning) || !pos.is_finite() {
            return;
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;

        if self.pointer_engaged {
            self.target_yaw += delta.x * self.settings.sensitivity;
            self.target_pitch =
                self.clamp_pitch(self.target_pitch + delta.y * self.settings.sensitivity);
            tracing::trace!(
                target_yaw = self.target_yaw,
                target_pitch = self.target_pitch,
                "orbit drag"
            );
        }
        if self.panning {
            self.pan(delta);
        }
    }

    /// Move the orbit target in the camera's screen plane.
    fn pan(&mut self, delta: Vec2) {
        let forward = -orbit_direction(self.yaw, self.pitch);
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.settings.pan_sensitivity * self.distance;
        let offset = (right * -delta.x + up * delta.y) * scale;
        if offset.is_finite() {
            self.target += offset;
            self.sync_position();
        }
    }

    /// Negative deltas move the camera closer.
    fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.distance = self.clamp_distance(self.distance + delta * self.settings.zoom_step);
        self.sync_position();
    }

    /// Advance smoothing by `dt` seconds and write the pose into the camera.
    ///
    /// Non-finite or negative `dt` does nothing. A failed pose write is
    /// logged and otherwise ignored.
    pub fn on_update<R: CameraRig + ?Sized>(&mut self, dt: f32, rig: &mut R) {
        if !dt.is_finite() || dt < 0.0 {
            tracing::trace!(dt, "ignoring invalid frame time");
            return;
        }
        let t = (self.settings.interpolation_speed * dt).min(1.0);
        self.yaw = approach(self.yaw, self.target_yaw, t);
        self.pitch = approach(self.pitch, self.target_pitch, t);
        self.sync_position();

        if let Err(e) = rig.set_camera_pose(self.camera, self.position, self.target) {
            tracing::debug!(camera = ?self.camera, "camera pose write failed: {e}");
        }
    }

    /// The camera this controller drives.
    pub fn camera(&self) -> CameraHandle {
        self.camera
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    pub fn target_pitch(&self) -> f32 {
        self.target_pitch
    }

    /// The point the camera orbits around.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_pointer_engaged(&self) -> bool {
        self.pointer_engaged
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
        }
    }

    pub fn set_interpolation_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed >= 0.0 {
            self.settings.interpolation_speed = speed;
        }
    }

    /// Recentre the orbit on `target` without changing angles or distance.
    pub fn set_target(&mut self, target: Vec3) {
        if target.is_finite() {
            self.target = target;
            self.sync_position();
        }
    }

    /// Set the angles the camera eases towards.
    pub fn set_target_angles(&mut self, yaw: f32, pitch: f32) {
        if yaw.is_finite() {
            self.target_yaw = yaw;
        }
        if pitch.is_finite() {
            self.target_pitch = self.clamp_pitch(pitch);
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        if distance.is_finite() {
            self.distance = self.clamp_distance(distance);
            self.sync_position();
        }
    }

    /// Return to the initial state from the settings and drop any drag.
    pub fn reset(&mut self) {
        *self = Self::with_settings(self.camera, self.settings);
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(-self.settings.pitch_limit, self.settings.pitch_limit)
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.settings.min_distance, self.settings.max_distance)
    }

    fn sync_position(&mut self) {
        self.position = pose_position(self.distance, self.yaw, self.pitch, self.target);
    }
}
