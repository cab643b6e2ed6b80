//! Shared types used across the orbitview crates.

mod types;

pub use types::{CameraHandle, RenderableId, Transform};
