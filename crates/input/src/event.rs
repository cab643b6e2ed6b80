use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer (mouse) buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Left mouse button or primary touch.
    Primary,
    /// Right mouse button.
    Secondary,
    Middle,
    /// Any other button, by platform id.
    Other(u16),
}

/// Keys the application binds. Everything else arrives as `Key::Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    F1,
    F5,
    Other(u32),
}

/// A window or pointer event.
///
/// Coordinates are window-space pixels with the origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerPressed {
        button: PointerButton,
        x: f32,
        y: f32,
    },
    PointerReleased {
        button: PointerButton,
        x: f32,
        y: f32,
    },
    PointerMoved {
        x: f32,
        y: f32,
    },
    /// Scroll wheel, in lines. Positive is away from the user.
    Scroll {
        delta: f32,
    },
    WindowResized {
        width: u32,
        height: u32,
    },
    WindowClosed,
    /// Window gained (`true`) or lost focus.
    WindowFocused(bool),
    KeyPressed(Key),
    KeyReleased(Key),
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    pub fn pointer_position(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerPressed { x, y, .. }
            | InputEvent::PointerReleased { x, y, .. }
            | InputEvent::PointerMoved { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerPressed { .. }
                | InputEvent::PointerReleased { .. }
                | InputEvent::PointerMoved { .. }
                | InputEvent::Scroll { .. }
        )
    }

    /// Short name for log output.
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::PointerPressed { .. } => "pointer_pressed",
            InputEvent::PointerReleased { .. } => "pointer_released",
            InputEvent::PointerMoved { .. } => "pointer_moved",
            InputEvent::Scroll { .. } => "scroll",
            InputEvent::WindowResized { .. } => "window_resized",
            InputEvent::WindowClosed => "window_closed",
            InputEvent::WindowFocused(_) => "window_focused",
            InputEvent::KeyPressed(_) => "key_pressed",
            InputEvent::KeyReleased(_) => "key_released",
        }
    }
}
