//! User list screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, TableState, Widget},
};

use super::ScreenAction;
use crate::domain::{ApiError, Route, User, UserId};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{UserTable, UserTableStyle};

pub struct UserListScreen {
    users: Vec<User>,
    table_state: TableState,
    loading: bool,
    error: Option<String>,
    pending_delete: Option<UserId>,
    theme: Theme,
}

impl UserListScreen {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            users: Vec::new(),
            table_state: TableState::default(),
            loading: true,
            error: None,
            pending_delete: None,
            theme,
        }
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replaces the rows, keeping the cursor in range.
    pub fn set_users(&mut self, users: Vec<User>) {
        self.loading = false;
        self.error = None;
        let selected = self.table_state.selected().unwrap_or(0);
        self.users = users;
        if self.users.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state
                .select(Some(selected.min(self.users.len() - 1)));
        }
    }

    /// Keeps the previous rows and shows the failure.
    pub fn set_error(&mut self, error: &ApiError) {
        self.loading = false;
        self.error = Some(error.banner());
    }

    #[must_use]
    pub fn selected_user(&self) -> Option<&User> {
        self.table_state.selected().and_then(|i| self.users.get(i))
    }

    fn select_next(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let next = self
            .table_state
            .selected()
            .map_or(0, |i| (i + 1).min(self.users.len() - 1));
        self.table_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let prev = self
            .table_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if let Some(id) = self.pending_delete.take() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => ScreenAction::Delete(id),
                _ => ScreenAction::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => ScreenAction::Quit,
            KeyCode::Esc => ScreenAction::Navigate(Route::Home),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                ScreenAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                ScreenAction::None
            }
            KeyCode::Char('a' | 'c') => ScreenAction::Navigate(Route::UserCreate),
            KeyCode::Char('e') | KeyCode::Enter => self
                .selected_user()
                .map_or(ScreenAction::None, |u| {
                    ScreenAction::Navigate(Route::UserEdit(u.id()))
                }),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.pending_delete = self.selected_user().map(User::id);
                ScreenAction::None
            }
            KeyCode::Char('r') => ScreenAction::Refresh,
            _ => ScreenAction::None,
        }
    }

    fn footer(&self) -> Line<'_> {
        if let Some(id) = self.pending_delete {
            let name = self
                .users
                .iter()
                .find(|u| u.id() == id)
                .map_or("this user", User::name);
            return Line::from(Span::styled(
                format!("Delete {name}? y: confirm | any other key: cancel"),
                self.theme.error_style,
            ));
        }
        if let Some(error) = &self.error {
            return Line::from(Span::styled(error.as_str(), self.theme.error_style));
        }
        if self.loading {
            return Line::from(Span::styled("Loading…", self.theme.dimmed_style));
        }
        Line::from(Span::styled(
            "a: add new user | e: edit | d: delete | r: refresh | Esc: home | Ctrl+X: logout",
            self.theme.dimmed_style,
        ))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let style = UserTableStyle {
            border_style: self.theme.border_style(),
            selected_style: self.theme.selection_style,
            empty_style: self.theme.error_style,
            ..UserTableStyle::default()
        };
        UserTable::new(&self.users)
            .title(" Users ")
            .style(style)
            .render(table_area, buf, &mut self.table_state);

        Paragraph::new(self.footer())
            .style(Style::default())
            .render(footer_area, buf);
    }
}
