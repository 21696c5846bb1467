//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{ScreenAction, centered_area};
use crate::domain::{ApiError, Credentials, Route};
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{Form, FormAction, FormField, TextInput};

const FORM_WIDTH: u16 = 56;

/// Login screen UI.
pub struct LoginScreen {
    form: Form,
}

impl LoginScreen {
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        let form = Form::new(
            "Login",
            vec![
                FormField::new(
                    "email",
                    TextInput::new("Email Address").placeholder("Email Address"),
                ),
                FormField::new(
                    "password",
                    TextInput::new("Password").password().placeholder("Password"),
                ),
            ],
        )
        .hint("Enter: login | Ctrl+R: register | Esc: back")
        .accent(theme.accent);

        Self { form }
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.form.value("email"), self.form.value("password"))
    }

    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if EventHandler::is_ctrl(&key, 'r') {
            return ScreenAction::Navigate(Route::Register);
        }
        if key.code == KeyCode::Esc {
            return ScreenAction::Navigate(Route::Home);
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

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content = centered_area(FORM_WIDTH, self.form.height(), area);
        self.form.render(content, buf);
    }
}
