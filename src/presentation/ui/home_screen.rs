//! Public landing screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::{ScreenAction, centered_area};
use crate::domain::Route;
use crate::presentation::events::EventHandler;
use crate::presentation::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuEntry {
    Login,
    Register,
    Users,
    Logout,
}

impl MenuEntry {
    const fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Users => "Users",
            Self::Logout => "Logout",
        }
    }

    const fn action(self) -> ScreenAction {
        match self {
            Self::Login => ScreenAction::Navigate(Route::Login),
            Self::Register => ScreenAction::Navigate(Route::Register),
            Self::Users => ScreenAction::Navigate(Route::Users),
            Self::Logout => ScreenAction::Logout,
        }
    }
}

pub struct HomeScreen {
    entries: Vec<MenuEntry>,
    list_state: ListState,
    theme: Theme,
}

impl HomeScreen {
    #[must_use]
    pub fn new(is_authenticated: bool, theme: Theme) -> Self {
        let entries = if is_authenticated {
            vec![MenuEntry::Users, MenuEntry::Logout]
        } else {
            vec![MenuEntry::Login, MenuEntry::Register]
        };
        Self {
            entries,
            list_state: ListState::default().with_selected(Some(0)),
            theme,
        }
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.label()).collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if EventHandler::is_quit_event(&key) {
            return ScreenAction::Quit;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list_state.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.list_state.select_next(),
            KeyCode::Enter => {
                let last = self.entries.len().saturating_sub(1);
                let selected = self.list_state.selected().unwrap_or(0).min(last);
                if let Some(entry) = self.entries.get(selected) {
                    return entry.action();
                }
            }
            KeyCode::Char('l') => return ScreenAction::Navigate(Route::Login),
            KeyCode::Char('r') => return ScreenAction::Navigate(Route::Register),
            KeyCode::Char('u') => return ScreenAction::Navigate(Route::Users),
            _ => {}
        }
        ScreenAction::None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.entries.len()).unwrap_or(u16::MAX).saturating_add(6);
        let content = centered_area(44, height, area);
        Clear.render(content, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(Line::from(" userdesk ").centered());
        let inner = block.inner(content);
        block.render(content, buf);

        let [intro, _, menu, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new("User management console")
            .centered()
            .render(intro, buf);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|e| ListItem::new(Line::from(Span::raw(e.label()))))
            .collect();
        let list = List::new(items)
            .highlight_style(self.theme.selection_style)
            .highlight_symbol("> ");
        StatefulWidget::render(list, menu, buf, &mut self.list_state);

        Paragraph::new("↑/↓ select | Enter open | q quit")
            .style(self.theme.dimmed_style.add_modifier(Modifier::ITALIC))
            .centered()
            .render(hint, buf);
    }
}
