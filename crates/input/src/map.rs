//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything a key can ask for while the game screen has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Game(GameAction),
    VolumeUp,
    VolumeDown,
    ToggleMute,
    Quit,
}

/// Keys understood by the name-entry prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKey {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}

/// Ctrl-C, honored in every mode
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    is_interrupt(key)
        || matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        )
}

/// Map keyboard input to a game command or host control.
pub fn map_key(key: KeyEvent) -> Option<Control> {
    if should_quit(key) {
        return Some(Control::Quit);
    }

    let action = match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => GameAction::MoveLeft,
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => GameAction::MoveRight,
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => GameAction::SoftDrop,

        // Rotation
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => GameAction::Rotate,

        KeyCode::Char('p') | KeyCode::Char('P') => GameAction::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => GameAction::Restart,

        // Audio
        KeyCode::Char('+') | KeyCode::Char('=') => return Some(Control::VolumeUp),
        KeyCode::Char('-') | KeyCode::Char('_') => return Some(Control::VolumeDown),
        KeyCode::Char('m') | KeyCode::Char('M') => return Some(Control::ToggleMute),

        _ => return None,
    };
    Some(Control::Game(action))
}

/// Map keyboard input while the name prompt is open.
pub fn map_name_entry_key(key: KeyEvent) -> Option<NameKey> {
    match key.code {
        KeyCode::Enter => Some(NameKey::Submit),
        KeyCode::Esc => Some(NameKey::Cancel),
        KeyCode::Backspace => Some(NameKey::Backspace),
        KeyCode::Char(c)
            if !c.is_control()
                && !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(NameKey::Char(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn game(code: KeyCode) -> Option<GameAction> {
        match map_key(KeyEvent::from(code)) {
            Some(Control::Game(action)) => Some(action),
            _ => None,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(game(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(game(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(game(KeyCode::Down), Some(GameAction::SoftDrop));

        assert_eq!(game(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(game(KeyCode::Char('d')), Some(GameAction::MoveRight));
        assert_eq!(game(KeyCode::Char('J')), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(game(KeyCode::Up), Some(GameAction::Rotate));
        assert_eq!(game(KeyCode::Char(' ')), Some(GameAction::Rotate));
        assert_eq!(game(KeyCode::Char('W')), Some(GameAction::Rotate));
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(game(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(game(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(game(KeyCode::Enter), Some(GameAction::Restart));
        assert_eq!(game(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_audio_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('+'))), Some(Control::VolumeUp));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('-'))), Some(Control::VolumeDown));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('m'))), Some(Control::ToggleMute));
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
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Q'))), Some(Control::Quit));
    }

    #[test]
    fn test_name_entry_keys() {
        assert_eq!(
            map_name_entry_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(NameKey::Char('q'))
        );
        assert_eq!(
            map_name_entry_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(NameKey::Char('A'))
        );
        assert_eq!(map_name_entry_key(KeyEvent::from(KeyCode::Enter)), Some(NameKey::Submit));
        assert_eq!(map_name_entry_key(KeyEvent::from(KeyCode::Esc)), Some(NameKey::Cancel));
        assert_eq!(
            map_name_entry_key(KeyEvent::from(KeyCode::Backspace)),
            Some(NameKey::Backspace)
        );
        assert_eq!(
            map_name_entry_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(map_name_entry_key(KeyEvent::from(KeyCode::Left)), None);
    }
}
