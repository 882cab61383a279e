//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::application::Route;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Command bound to a global shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalCommand {
    /// Switch to a screen.
    Navigate(Route),
    /// End the session.
    Logout,
    /// Exit application.
    Quit,
}

/// Key classification helpers.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// Checks if key is a release, which screens ignore.
    #[must_use]
    pub fn is_release_event(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Release
    }

    /// Maps a key to a global command, if any.
    #[must_use]
    pub fn global_command(key: &KeyEvent) -> Option<GlobalCommand> {
        if Self::is_quit_event(key) {
            return Some(GlobalCommand::Quit);
        }
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Char('w') => Some(GlobalCommand::Navigate(Route::Workshops)),
            KeyCode::Char('b') => Some(GlobalCommand::Navigate(Route::MyBookings)),
            KeyCode::Char('l') => Some(GlobalCommand::Navigate(Route::Login)),
            KeyCode::Char('r') => Some(GlobalCommand::Navigate(Route::Register)),
            KeyCode::Char('o') => Some(GlobalCommand::Logout),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_submit_event() {
        assert!(EventHandler::is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_submit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_release_event() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert!(EventHandler::is_release_event(&release));
        assert!(!EventHandler::is_release_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
    }

    #[test_case('w', GlobalCommand::Navigate(Route::Workshops) ; "workshops")]
    #[test_case('b', GlobalCommand::Navigate(Route::MyBookings) ; "my bookings")]
    #[test_case('l', GlobalCommand::Navigate(Route::Login) ; "login")]
    #[test_case('r', GlobalCommand::Navigate(Route::Register) ; "register")]
    #[test_case('o', GlobalCommand::Logout ; "logout")]
    #[test_case('c', GlobalCommand::Quit ; "quit")]
    fn test_global_commands(c: char, expected: GlobalCommand) {
        let key = make_key_event(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(EventHandler::global_command(&key), Some(expected));
    }

    #[test]
    fn test_plain_letters_are_not_global() {
        let key = make_key_event(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(EventHandler::global_command(&key), None);
    }
}
