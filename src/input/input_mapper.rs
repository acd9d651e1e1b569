//! Input mapping from display events to semantic actions
//!
//! Only two events end the loop: a close request and a key-down of the
//! `q` key. Key identity ignores Shift and Caps Lock, so a shifted press of
//! the Q key still quits. Everything else is ignored.

use tether_display::{DisplayEvent, Keycode};

/// Actions triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Leave the display loop
    Quit,
}

/// Key that quits the loop; matching is case-sensitive
pub const QUIT_KEY: char = 'q';

/// Maps display events to actions
pub struct InputMapper;

impl InputMapper {
    /// Map one event to an action
    ///
    /// Returns `None` for events the loop does not react to
    pub fn map_event(event: &DisplayEvent) -> Option<InputAction> {
        match event {
            DisplayEvent::CloseRequested => Some(InputAction::Quit),
            DisplayEvent::KeyDown { key, .. } => Self::map_key(*key),
            _ => None,
        }
    }

    /// Map a pressed key to an action
    pub fn map_key(key: Keycode) -> Option<InputAction> {
        match key {
            Keycode::Char(QUIT_KEY) => Some(InputAction::Quit),
            _ => None,
        }
    }

    /// First action in queue order, if any
    pub fn first_action<'a, I>(events: I) -> Option<InputAction>
    where
        I: IntoIterator<Item = &'a DisplayEvent>,
    {
        events.into_iter().find_map(Self::map_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(c: char) -> DisplayEvent {
        DisplayEvent::KeyDown { key: Keycode::Char(c), repeat: false }
    }

    #[test]
    fn test_close_request_quits() {
        assert_eq!(
            InputMapper::map_event(&DisplayEvent::CloseRequested),
            Some(InputAction::Quit)
        );
    }

    #[test]
    fn test_q_key_down_quits() {
        assert_eq!(InputMapper::map_event(&key_down('q')), Some(InputAction::Quit));
    }

    #[test]
    fn test_repeated_q_still_quits() {
        let event = DisplayEvent::KeyDown { key: Keycode::Char('q'), repeat: true };
        assert_eq!(InputMapper::map_event(&event), Some(InputAction::Quit));
    }

    #[test]
    fn test_q_key_with_shift_or_caps_lock_quits() {
        use tether_display::translate_key_input;
        use winit::keyboard::{Key, KeyCode, PhysicalKey, SmolStr};

        let key = translate_key_input(&Key::Character(SmolStr::new("Q")), PhysicalKey::Code(KeyCode::KeyQ));
        let event = DisplayEvent::KeyDown { key, repeat: false };
        assert_eq!(InputMapper::map_event(&event), Some(InputAction::Quit));
    }

    #[test]
    fn test_uppercase_q_ignored() {
        assert_eq!(InputMapper::map_event(&key_down('Q')), None);
    }

    #[test]
    fn test_q_key_up_ignored() {
        let event = DisplayEvent::KeyUp { key: Keycode::Char('q') };
        assert_eq!(InputMapper::map_event(&event), None);
    }

    #[test]
    fn test_other_events_ignored() {
        for event in [
            key_down('w'),
            DisplayEvent::KeyDown { key: Keycode::Escape, repeat: false },
            DisplayEvent::Resized { width: 640, height: 480 },
            DisplayEvent::FocusChanged(false),
        ] {
            assert_eq!(InputMapper::map_event(&event), None, "{:?} should not quit", event);
        }
    }

    #[test]
    fn test_first_action_scans_whole_queue() {
        let events = vec![key_down('a'), key_down('Q'), DisplayEvent::CloseRequested];
        assert_eq!(InputMapper::first_action(&events), Some(InputAction::Quit));
        assert_eq!(InputMapper::first_action(&events[..2]), None);
    }
}
