//! Table of users with a selection cursor.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState},
};

use crate::domain::entities::User;

pub const EMPTY_MESSAGE: &str = "Data Belum Tersedia!";

#[derive(Debug, Clone, Copy)]
pub struct UserTableStyle {
    pub border_style: Style,
    pub header_style: Style,
    pub selected_style: Style,
    pub empty_style: Style,
}

impl Default for UserTableStyle {
    fn default() -> Self {
        Self {
            border_style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            selected_style: Style::default().add_modifier(Modifier::REVERSED),
            empty_style: Style::default().add_modifier(Modifier::ITALIC),
        }
    }
}

pub struct UserTable<'a> {
    users: &'a [User],
    title: &'a str,
    style: UserTableStyle,
}

impl<'a> UserTable<'a> {
    #[must_use]
    pub fn new(users: &'a [User]) -> Self {
        Self {
            users,
            title: " Users ",
            style: UserTableStyle::default(),
        }
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: UserTableStyle) -> Self {
        self.style = style;
        self
    }
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "-".to_string(),
        |ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

impl StatefulWidget for UserTable<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let header = Row::new(["No", "Name", "Email", "Updated"]).style(self.style.header_style);

        let rows: Vec<Row> = if self.users.is_empty() {
            vec![Row::new([
                Cell::from(""),
                Cell::from(EMPTY_MESSAGE).style(self.style.empty_style),
            ])]
        } else {
            self.users
                .iter()
                .enumerate()
                .map(|(i, user)| {
                    Row::new([
                        Cell::from((i + 1).to_string()),
                        Cell::from(user.name().to_string()),
                        Cell::from(user.email().to_string()),
                        Cell::from(format_timestamp(user.updated_at())),
                    ])
                })
                .collect()
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Min(16),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.style.border_style)
                .title(self.title),
        )
        .row_highlight_style(self.style.selected_style)
        .highlight_symbol("> ");

        if self.users.is_empty() {
            state.select(None);
        }
        StatefulWidget::render(table, area, buf, state);
    }
}
