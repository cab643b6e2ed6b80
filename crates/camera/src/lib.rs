//! Orbit camera control.
//!
//! Turns pointer events and per-frame elapsed time into a smoothed orbital
//! pose (yaw, pitch, distance around a target point) and writes it into a
//! camera owned by a render context.
//!
//! # Invariants
//! - Pitch (current and target) stays strictly inside (-90°, 90°).
//! - Distance stays inside the configured bounds.
//! - Position is always derived from distance, yaw, pitch and target.
//! - Camera motion never touches projection, clip planes or viewport.

mod orbit;
mod settings;

pub use orbit::{OrbitCameraController, orbit_direction, pose_position};
pub use settings::OrbitSettings;

pub fn crate_info() -> &'static str {
    "orbitview-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
