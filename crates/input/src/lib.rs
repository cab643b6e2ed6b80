//! Input events delivered by the windowing layer.
//!
//! # Invariants
//! - Components receive events by reference and never poll global input state.
//! - Events a component does not understand are ignored, never rejected.

pub mod event;

pub use event::{InputEvent, Key, PointerButton};

pub fn crate_info() -> &'static str {
    "orbitview-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
