//! Window events translated into engine terms

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};

/// Key identity as reported by the window system
///
/// Printable keys carry the character of the key itself. Shift and Caps Lock
/// do not change it, so the Q key is always `Char('q')`. `Char('Q')` is a
/// different key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keycode {
    Char(char),
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Other,
}

/// Event drained from the window system
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    /// The OS asked the window to close
    CloseRequested,
    KeyDown { key: Keycode, repeat: bool },
    KeyUp { key: Keycode },
    Resized { width: u32, height: u32 },
    FocusChanged(bool),
}

/// Logical key of a keyboard event with Shift and Caps Lock undone
///
/// Letter keys (by physical position) report their character in lowercase.
/// Every other key is passed through unchanged.
pub fn unmodified_key(logical: &Key, physical: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical else {
        return logical.clone();
    };
    match logical {
        Key::Character(text) if is_letter_key(code) && text.chars().count() == 1 => {
            Key::Character(text.to_lowercase().into())
        }
        _ => logical.clone(),
    }
}

fn is_letter_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::KeyA | KeyCode::KeyB | KeyCode::KeyC | KeyCode::KeyD | KeyCode::KeyE
            | KeyCode::KeyF | KeyCode::KeyG | KeyCode::KeyH | KeyCode::KeyI | KeyCode::KeyJ
            | KeyCode::KeyK | KeyCode::KeyL | KeyCode::KeyM | KeyCode::KeyN | KeyCode::KeyO
            | KeyCode::KeyP | KeyCode::KeyQ | KeyCode::KeyR | KeyCode::KeyS | KeyCode::KeyT
            | KeyCode::KeyU | KeyCode::KeyV | KeyCode::KeyW | KeyCode::KeyX | KeyCode::KeyY
            | KeyCode::KeyZ
    )
}

/// Map a key press to a [`Keycode`], ignoring Shift and Caps Lock
pub fn translate_key_input(logical: &Key, physical: PhysicalKey) -> Keycode {
    translate_key(&unmodified_key(logical, physical))
}

/// Map a logical key to a [`Keycode`]
pub fn translate_key(key: &Key) -> Keycode {
    match key {
        Key::Named(NamedKey::Space) => Keycode::Space,
        Key::Character(text) if text.as_str() == " " => Keycode::Space,
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Keycode::Char(c),
                _ => Keycode::Other,
            }
        }
        Key::Named(NamedKey::Escape) => Keycode::Escape,
        Key::Named(NamedKey::Enter) => Keycode::Enter,
        Key::Named(NamedKey::Tab) => Keycode::Tab,
        Key::Named(NamedKey::Backspace) => Keycode::Backspace,
        _ => Keycode::Other,
    }
}

/// Translate a winit window event; events Tether ignores map to `None`
pub fn translate_window_event(event: &WindowEvent) -> Option<DisplayEvent> {
    match event {
        WindowEvent::CloseRequested => Some(DisplayEvent::CloseRequested),
        WindowEvent::KeyboardInput { event, .. } => {
            let key = translate_key_input(&event.logical_key, event.physical_key);
            Some(match event.state {
                ElementState::Pressed => DisplayEvent::KeyDown { key, repeat: event.repeat },
                ElementState::Released => DisplayEvent::KeyUp { key },
            })
        }
        WindowEvent::Resized(size) => Some(DisplayEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::Focused(focused) => Some(DisplayEvent::FocusChanged(*focused)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;
    use winit::keyboard::SmolStr;

    #[test]
    fn test_character_keys_keep_case() {
        assert_eq!(translate_key(&Key::Character(SmolStr::new("q"))), Keycode::Char('q'));
        assert_eq!(translate_key(&Key::Character(SmolStr::new("Q"))), Keycode::Char('Q'));
    }

    #[test]
    fn test_shifted_letter_key_is_lowercase() {
        // Shift held or Caps Lock on
        let key = translate_key_input(&Key::Character(SmolStr::new("Q")), PhysicalKey::Code(KeyCode::KeyQ));
        assert_eq!(key, Keycode::Char('q'));
    }

    #[test]
    fn test_layout_letter_follows_logical_key() {
        // AZERTY: the key at the A position types 'q'
        let key = translate_key_input(&Key::Character(SmolStr::new("Q")), PhysicalKey::Code(KeyCode::KeyA));
        assert_eq!(key, Keycode::Char('q'));
    }

    #[test]
    fn test_non_letter_keys_unchanged() {
        let key = translate_key_input(&Key::Character(SmolStr::new("!")), PhysicalKey::Code(KeyCode::Digit1));
        assert_eq!(key, Keycode::Char('!'));
        let escape = translate_key_input(&Key::Named(NamedKey::Escape), PhysicalKey::Code(KeyCode::Escape));
        assert_eq!(escape, Keycode::Escape);
    }

    #[test]
    fn test_multi_char_text_is_other() {
        assert_eq!(translate_key(&Key::Character(SmolStr::new("ab"))), Keycode::Other);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(translate_key(&Key::Named(NamedKey::Escape)), Keycode::Escape);
        assert_eq!(translate_key(&Key::Named(NamedKey::Space)), Keycode::Space);
        assert_eq!(translate_key(&Key::Character(SmolStr::new(" "))), Keycode::Space);
        assert_eq!(translate_key(&Key::Named(NamedKey::F1)), Keycode::Other);
    }

    #[test]
    fn test_close_and_resize_translation() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested),
            Some(DisplayEvent::CloseRequested)
        );
        assert_eq!(
            translate_window_event(&WindowEvent::Resized(PhysicalSize::new(640, 480))),
            Some(DisplayEvent::Resized { width: 640, height: 480 })
        );
        assert_eq!(translate_window_event(&WindowEvent::Destroyed), None);
    }
}
