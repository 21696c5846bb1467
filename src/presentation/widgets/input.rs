//! Single-line text input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const MASK_CHAR: char = '•';

/// Text input field. The cursor is a char index, not a byte offset.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    masked: bool,
    placeholder: String,
    label: String,
    accent: Color,
}

impl TextInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            masked: false,
            placeholder: String::new(),
            label: label.into(),
            accent: Color::Cyan,
        }
    }

    /// Enables password masking.
    #[must_use]
    pub fn password(mut self) -> Self {
        self.masked = true;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    #[must_use]
    pub fn accent(mut self, color: Color) -> Self {
        self.accent = color;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn input_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Applies an editing key. Returns `false` for keys the input ignores.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.input_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    fn display_text(&self) -> String {
        if self.value.is_empty() {
            self.placeholder.clone()
        } else if self.masked {
            MASK_CHAR.to_string().repeat(self.char_count())
        } else {
            self.value.clone()
        }
    }

    fn cursor_column(&self) -> usize {
        if self.masked {
            self.cursor
        } else {
            self.value
                .chars()
                .take(self.cursor)
                .collect::<String>()
                .width()
        }
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text_style = if self.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.display_text())
            .style(text_style)
            .render(inner, buf);

        if self.focused && inner.width > 0 {
            let column = u16::try_from(self.cursor_column()).unwrap_or(u16::MAX);
            let cursor_x = inner.x.saturating_add(column);
            if cursor_x < inner.x + inner.width {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_input_basic() {
        let mut input = TextInput::new("Email");
        assert!(input.value().is_empty());

        input.input_char('a');
        input.input_char('b');
        assert_eq!(input.value(), "ab");

        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Name");
        input.set_value("Žaneta");
        input.move_start();
        input.move_right();
        input.input_char('x');
        assert_eq!(input.value(), "Žxaneta");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "xaneta");
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::new("Password").password();
        input.set_value("sécret");

        assert_eq!(input.display_text(), "••••••");
    }

    #[test]
    fn test_handle_key_ignores_control_chords() {
        let mut input = TextInput::new("Email");
        assert!(input.handle_key(key(KeyCode::Char('a'))));
        assert!(!input.handle_key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::CONTROL
        )));
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert_eq!(input.value(), "a");
    }
}
