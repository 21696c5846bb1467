//! Create and edit user screens.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{ScreenAction, centered_area};
use crate::domain::{ApiError, Route, User, UserDraft, UserId};
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{Form, FormAction, FormField, TextInput};

const FORM_WIDTH: u16 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFormMode {
    Create,
    Edit(UserId),
}

pub struct UserFormScreen {
    mode: UserFormMode,
    form: Form,
    loading: bool,
}

impl UserFormScreen {
    #[must_use]
    pub fn new(mode: UserFormMode, theme: &Theme) -> Self {
        let (title, password) = match mode {
            UserFormMode::Create => (
                "Add New User".to_string(),
                TextInput::new("Password").password().placeholder("Password"),
            ),
            UserFormMode::Edit(id) => (
                format!("Edit User #{id}"),
                TextInput::new("Password")
                    .password()
                    .placeholder("Leave blank to keep current password"),
            ),
        };
        let form = Form::new(
            title,
            vec![
                FormField::new("name", TextInput::new("Full Name").placeholder("Full Name")),
                FormField::new(
                    "email",
                    TextInput::new("Email Address").placeholder("Email Address"),
                ),
                FormField::new("password", password),
            ],
        )
        .hint("Enter: save | Esc: back to list | Ctrl+X: logout")
        .accent(theme.accent);

        Self {
            mode,
            form,
            loading: matches!(mode, UserFormMode::Edit(_)),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> UserFormMode {
        self.mode
    }

    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Builds the request body. A blank password is left out.
    #[must_use]
    pub fn draft(&self) -> UserDraft {
        UserDraft::new(self.form.value("name"), self.form.value("email"))
            .with_password(self.form.value("password"))
    }

    /// Fills name and email from the fetched record; the password stays blank.
    pub fn prefill(&mut self, user: &User) {
        self.loading = false;
        self.form.set_value("name", user.name());
        self.form.set_value("email", user.email());
    }

    /// Leaves the form empty and reports why.
    pub fn prefill_failed(&mut self, error: &ApiError) {
        self.loading = false;
        self.form.set_banner(format!("Could not load user: {}", error.banner()));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if key.code == KeyCode::Esc {
            return ScreenAction::Navigate(Route::Users);
        }
        if self.loading && EventHandler::is_submit_event(&key) {
            return ScreenAction::None;
        }
        match self.form.handle_key(key) {
            FormAction::Submit => {
                self.form.begin_submit();
                ScreenAction::Submit
            }
            FormAction::None => ScreenAction::None,
        }
    }

    pub fn fail(&mut self, error: &ApiError) {
        self.form.fail(error);
    }
}

impl Widget for &UserFormScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content = centered_area(FORM_WIDTH, self.form.height(), area);
        self.form.render(content, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationErrors;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_prefill_keeps_password_blank() {
        let mut screen = UserFormScreen::new(UserFormMode::Edit(UserId(3)), &Theme::default());
        assert!(screen.is_loading());

        screen.prefill(&User::new(3, "Rina", "rina@example.com"));

        assert!(!screen.is_loading());
        let draft = screen.draft();
        assert_eq!(draft.name, "Rina");
        assert_eq!(draft.email, "rina@example.com");
        assert_eq!(draft.password, None);
    }

    #[test]
    fn test_enter_ignored_until_prefilled() {
        let mut screen = UserFormScreen::new(UserFormMode::Edit(UserId(3)), &Theme::default());
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), ScreenAction::None);

        screen.prefill(&User::new(3, "Rina", "rina@example.com"));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), ScreenAction::Submit);
    }

    #[test]
    fn test_prefill_failure_shows_banner() {
        let mut screen = UserFormScreen::new(UserFormMode::Edit(UserId(9)), &Theme::default());
        screen.prefill_failed(&ApiError::rejected(
            404,
            "User tidak ditemukan",
            ValidationErrors::new(),
        ));

        assert!(!screen.is_loading());
        assert_eq!(
            screen.form().banner(),
            Some("Could not load user: User tidak ditemukan")
        );
        assert_eq!(screen.draft().name, "");
    }

    #[test]
    fn test_create_sends_typed_password() {
        let mut screen = UserFormScreen::new(UserFormMode::Create, &Theme::default());
        assert!(!screen.is_loading());
        screen.form_mut().set_value("password", "secret1");
        assert_eq!(screen.draft().password.as_deref(), Some("secret1"));
    }

    #[test]
    fn test_escape_returns_to_list() {
        let mut screen = UserFormScreen::new(UserFormMode::Create, &Theme::default());
        assert_eq!(
            screen.handle_key(key(KeyCode::Esc)),
            ScreenAction::Navigate(Route::Users)
        );
    }
}
