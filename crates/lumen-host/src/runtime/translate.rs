use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::PhysicalKey;
use winit::window::Window;

use crate::platform::{InputEvent, PointerButton};

/// Translates a winit event into a session input event, tracking the pointer
/// so button events carry a position.
///
/// Returns `None` for events that are not input.
pub(super) fn translate_input_event(
    window: &Window,
    pointer: &mut Option<(f32, f32)>,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window.scale_factor(), *position);
            *pointer = Some((x, y));
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::CursorLeft { .. } => {
            *pointer = None;
            None
        }

        WindowEvent::MouseInput { state, button, .. } => {
            // winit 0.30 has no cursor query; use the tracked position.
            let (x, y) = pointer.unwrap_or((0.0, 0.0));
            Some(InputEvent::PointerButton {
                button: map_mouse_button(*button),
                pressed: *state == ElementState::Pressed,
                x,
                y,
            })
        }

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            code: key_code(event.physical_key),
            pressed: event.state == ElementState::Pressed,
            repeat: event.repeat,
        }),

        WindowEvent::Ime(Ime::Commit(text)) if !text.is_empty() => {
            Some(InputEvent::Text(text.clone()))
        }

        _ => None,
    }
}

fn to_logical_f32(scale: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> PointerButton {
    match b {
        WinitMouseButton::Left => PointerButton::Left,
        WinitMouseButton::Right => PointerButton::Right,
        WinitMouseButton::Middle => PointerButton::Middle,
        WinitMouseButton::Back => PointerButton::Back,
        WinitMouseButton::Forward => PointerButton::Forward,
        WinitMouseButton::Other(v) => PointerButton::Other(v),
    }
}

// NativeKeyCode has no stable numeric form in winit 0.30.
fn key_code(pk: PhysicalKey) -> u32 {
    match pk {
        PhysicalKey::Code(code) => code as u32,
        PhysicalKey::Unidentified(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::{KeyCode, NativeKeyCode};

    use super::*;

    #[test]
    fn mouse_buttons_map_one_to_one() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), PointerButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Back), PointerButton::Back);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(9)), PointerButton::Other(9));
    }

    #[test]
    fn positions_are_scaled_to_logical_pixels() {
        assert_eq!(to_logical_f32(2.0, PhysicalPosition::new(200.0, 50.0)), (100.0, 25.0));
        assert_eq!(to_logical_f32(1.0, PhysicalPosition::new(3.0, 4.0)), (3.0, 4.0));
    }

    #[test]
    fn unidentified_keys_have_code_zero() {
        assert_eq!(key_code(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)), 0);
        assert_ne!(
            key_code(PhysicalKey::Code(KeyCode::KeyA)),
            key_code(PhysicalKey::Code(KeyCode::KeyB))
        );
    }
}
