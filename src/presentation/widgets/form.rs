//! Form widget: a stack of labelled inputs, each with its first validation
//! message underneath, and a flat banner on top.

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::TextInput;
use crate::domain::{ApiError, ValidationErrors};
use crate::presentation::events::EventHandler;

const FIELD_HEIGHT: u16 = 3;
const ERROR_HEIGHT: u16 = 1;

/// An input bound to the field name the server reports errors under.
#[derive(Debug, Clone)]
pub struct FormField {
    key: &'static str,
    input: TextInput,
}

impl FormField {
    #[must_use]
    pub fn new(key: &'static str, input: TextInput) -> Self {
        Self { key, input }
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
}

#[derive(Debug, Clone)]
pub struct Form {
    title: String,
    fields: Vec<FormField>,
    focus: usize,
    errors: ValidationErrors,
    banner: Option<String>,
    submitting: bool,
    hint: String,
    accent: Color,
}

impl Form {
    #[must_use]
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        let mut form = Self {
            title: title.into(),
            fields,
            focus: 0,
            errors: ValidationErrors::new(),
            banner: None,
            submitting: false,
            hint: "Tab: next field | Enter: submit".to_string(),
            accent: Color::Cyan,
        };
        form.sync_focus();
        form
    }

    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    #[must_use]
    pub fn accent(mut self, color: Color) -> Self {
        self.accent = color;
        for field in &mut self.fields {
            field.input = field.input.clone().accent(color);
        }
        self
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.input.set_focused(i == focus);
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
            self.sync_focus();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            self.sync_focus();
        }
    }

    #[must_use]
    pub const fn focused_index(&self) -> usize {
        self.focus
    }

    /// Routes a key to navigation, submission or the focused input.
    ///
    /// Enter is swallowed while a submission is in flight.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if EventHandler::is_submit_event(&key) {
            return if self.submitting {
                FormAction::None
            } else {
                FormAction::Submit
            };
        }
        if EventHandler::is_next_field_event(&key) {
            self.focus_next();
        } else if EventHandler::is_prev_field_event(&key) {
            self.focus_prev();
        } else if let Some(field) = self.fields.get_mut(self.focus) {
            field.input.handle_key(key);
        }
        FormAction::None
    }

    /// Raw value of the field named `key`, empty when there is no such field.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map_or("", |f| f.input.value())
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.input.set_value(value);
        }
    }

    /// Clears errors and the banner and marks the form busy.
    pub fn begin_submit(&mut self) {
        self.errors = ValidationErrors::new();
        self.banner = None;
        self.submitting = true;
    }

    /// Replaces the field errors with the server's and shows its message.
    pub fn fail(&mut self, error: &ApiError) {
        self.submitting = false;
        self.errors = error.fields();
        let banner = error.banner();
        self.banner = (!banner.is_empty()).then_some(banner);
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }

    pub fn set_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    #[must_use]
    pub fn error_for(&self, key: &str) -> Option<&str> {
        self.errors.first(key)
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Rows needed to draw the form without clipping, borders included.
    #[must_use]
    pub fn height(&self) -> u16 {
        let fields = u16::try_from(self.fields.len()).unwrap_or(u16::MAX);
        fields
            .saturating_mul(FIELD_HEIGHT + ERROR_HEIGHT)
            .saturating_add(2 + 2 + 1)
    }
}

impl Widget for &Form {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(Line::from(format!(" {} ", self.title)).centered());
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints = vec![Constraint::Length(2)];
        for _ in &self.fields {
            constraints.push(Constraint::Length(FIELD_HEIGHT));
            constraints.push(Constraint::Length(ERROR_HEIGHT));
        }
        constraints.push(Constraint::Min(1));
        let rows = Layout::vertical(constraints).split(inner);

        if let Some(banner) = &self.banner {
            Paragraph::new(banner.as_str())
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .render(rows[0], buf);
        }

        for (i, field) in self.fields.iter().enumerate() {
            let input_area = rows[1 + i * 2];
            let error_area = rows[2 + i * 2];
            field.input.render(input_area, buf);
            if let Some(message) = self.errors.first(field.key) {
                Paragraph::new(format!(" {message}"))
                    .style(Style::default().fg(Color::Red))
                    .render(error_area, buf);
            }
        }

        let footer = if self.submitting {
            Paragraph::new("Submitting…").style(Style::default().fg(Color::Yellow))
        } else {
            Paragraph::new(self.hint.as_str()).style(Style::default().fg(Color::DarkGray))
        };
        if let Some(area) = rows.last() {
            footer.centered().render(*area, buf);
        }
    }
}
