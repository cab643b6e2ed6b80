use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tuning and initial state for an orbit camera.
///
/// Angles are radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Radians of orbit per pixel of pointer drag.
    pub sensitivity: f32,
    /// Fraction of `distance` the target moves per pixel of pan drag.
    pub pan_sensitivity: f32,
    /// Distance change per scroll line.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest absolute pitch. Kept strictly below 90°.
    pub pitch_limit: f32,
    /// Smoothing rate; higher converges faster.
    pub interpolation_speed: f32,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            pan_sensitivity: 0.002,
            zoom_step: 0.5,
            min_distance: 0.5,
            max_distance: 500.0,
            pitch_limit: 89.0_f32.to_radians(),
            interpolation_speed: 5.0,
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            target: Vec3::ZERO,
        }
    }
}

/// Smallest usable orbit distance; at zero the camera sits on its target.
const DISTANCE_FLOOR: f32 = 1e-3;

impl OrbitSettings {
    /// Copy with every bound made usable: finite and ordered, distances
    /// positive, pitch limit below 90°.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };

        let mut min_distance =
            finite_or(self.min_distance, defaults.min_distance).max(DISTANCE_FLOOR);
        let mut max_distance =
            finite_or(self.max_distance, defaults.max_distance).max(DISTANCE_FLOOR);
        if min_distance > max_distance {
            std::mem::swap(&mut min_distance, &mut max_distance);
        }
        let max_pitch = std::f32::consts::FRAC_PI_2 - 1e-3;
        let pitch_limit = finite_or(self.pitch_limit, defaults.pitch_limit)
            .abs()
            .min(max_pitch);

        Self {
            sensitivity: finite_or(self.sensitivity, defaults.sensitivity),
            pan_sensitivity: finite_or(self.pan_sensitivity, defaults.pan_sensitivity),
            zoom_step: finite_or(self.zoom_step, defaults.zoom_step),
            min_distance,
            max_distance,
            pitch_limit,
            interpolation_speed: finite_or(self.interpolation_speed, defaults.interpolation_speed)
                .max(0.0),
            distance: finite_or(self.distance, defaults.distance).clamp(min_distance, max_distance),
            yaw: finite_or(self.yaw, defaults.yaw),
            pitch: finite_or(self.pitch, defaults.pitch).clamp(-pitch_limit, pitch_limit),
            target: if self.target.is_finite() {
                self.target
            } else {
                defaults.target
            },
        }
    }
}
