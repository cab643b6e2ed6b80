use glam::Vec2;
use orbitview_input::{InputEvent, Key, PointerButton};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels treated as one scroll line for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 40.0;

/// Turns winit window events into [`InputEvent`]s.
///
/// winit reports button presses without a position, so the last cursor
/// position is tracked here.
#[derive(Debug, Default)]
pub struct EventTranslator {
    cursor: Vec2,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::PointerMoved {
                    x: self.cursor.x,
                    y: self.cursor.y,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = pointer_button(*button);
                let (x, y) = (self.cursor.x, self.cursor.y);
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerPressed { button, x, y },
                    ElementState::Released => InputEvent::PointerReleased { button, x, y },
                })
            }
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scroll {
                delta: scroll_delta(*delta),
            }),
            WindowEvent::Resized(size) => Some(InputEvent::WindowResized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CloseRequested => Some(InputEvent::WindowClosed),
            WindowEvent::Focused(focused) => Some(InputEvent::WindowFocused(*focused)),
            WindowEvent::KeyboardInput { event, .. } if !event.repeat => {
                let key = key(event);
                Some(match event.state {
                    ElementState::Pressed => InputEvent::KeyPressed(key),
                    ElementState::Released => InputEvent::KeyReleased(key),
                })
            }
            _ => None,
        }
    }
}

pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(id) => PointerButton::Other(id),
    }
}

/// Scroll in lines. Wheel-up (away from the user) is negative, which zooms in.
pub fn scroll_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / PIXELS_PER_LINE,
    }
}

fn key(event: &KeyEvent) -> Key {
    match event.physical_key {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::F1) => Key::F1,
        PhysicalKey::Code(KeyCode::F5) => Key::F5,
        _ => Key::Other(
            event
                .text
                .as_ref()
                .and_then(|t| t.chars().next())
                .map_or(0, u32::from),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn buttons_map_to_pointer_buttons() {
        assert_eq!(pointer_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(pointer_button(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(pointer_button(MouseButton::Middle), PointerButton::Middle);
        assert_eq!(pointer_button(MouseButton::Other(9)), PointerButton::Other(9));
    }

    #[test]
    fn wheel_up_zooms_in() {
        assert_eq!(scroll_delta(MouseScrollDelta::LineDelta(0.0, 1.0)), -1.0);
        assert_eq!(scroll_delta(MouseScrollDelta::LineDelta(0.0, -2.0)), 2.0);
    }

    #[test]
    fn pixel_scroll_scaled_to_lines() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0));
        assert_eq!(scroll_delta(delta), -2.0);
    }

    #[test]
    fn resize_and_focus_translate() {
        let mut translator = EventTranslator::new();
        let resized = translator.translate(&WindowEvent::Resized(winit::dpi::PhysicalSize::new(
            640, 480,
        )));
        assert_eq!(
            resized,
            Some(InputEvent::WindowResized {
                width: 640,
                height: 480
            })
        );
        assert_eq!(
            translator.translate(&WindowEvent::Focused(false)),
            Some(InputEvent::WindowFocused(false))
        );
        assert_eq!(
            translator.translate(&WindowEvent::CloseRequested),
            Some(InputEvent::WindowClosed)
        );
        assert_eq!(translator.cursor(), Vec2::ZERO);
    }
}
