//! Developer Tooling: frame statistics and render context inspection.
//!
//! # Invariants
//! - Tools only read render state, except for queuing debug text.

mod frame_stats;
mod inspector;

pub use frame_stats::FrameStats;
pub use inspector::{RenderInspector, RenderSummary};

pub fn crate_info() -> &'static str {
    "orbitview-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
