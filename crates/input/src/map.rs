//! Key mapping from terminal events to ship actions.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the keyboard player's ship action.
pub fn map_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Char(' ') => Some(Action::Shoot),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(Action::Left));
        assert_eq!(map_key(KeyCode::Right), Some(Action::Right));
        assert_eq!(map_key(KeyCode::Char('a')), Some(Action::Left));
        assert_eq!(map_key(KeyCode::Char('D')), Some(Action::Right));
    }

    #[test]
    fn test_shoot_key() {
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Action::Shoot));
        assert_eq!(map_key(KeyCode::Enter), None);
        assert_eq!(map_key(KeyCode::Up), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char(' '))));
    }
}
