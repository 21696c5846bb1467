//! Key classification shared by every screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Terminal key classifier.
pub struct EventHandler;

impl EventHandler {
    /// Ctrl+C: quits from any screen, including forms.
    #[must_use]
    pub fn is_force_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// `q`, `Esc` or Ctrl+C. Only screens without text input honor `q`/`Esc`.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        Self::is_force_quit_event(key)
            || matches!(
                key,
                KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    modifiers: KeyModifiers::NONE,
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

    /// Ctrl+X ends the session on protected screens.
    #[must_use]
    pub fn is_logout_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('x'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_next_field_event(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Tab | KeyCode::Down)
    }

    #[must_use]
    pub fn is_prev_field_event(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::BackTab | KeyCode::Up)
    }

    /// Ctrl+<c>, used for in-form navigation shortcuts.
    #[must_use]
    pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
        key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}
