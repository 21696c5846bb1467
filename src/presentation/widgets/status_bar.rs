//! Bottom status line with left, center and right segments.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// Status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    level: StatusLevel,
}

impl StatusBar {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
        }
    }

    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    #[must_use]
    pub fn center(mut self, content: impl Into<String>) -> Self {
        self.center = content.into();
        self
    }

    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Lays the segments out on a line of `width` cells.
    fn line(&self, width: usize) -> Line<'_> {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);

        let left_len = self.left.width();
        let center_len = self.center.width();
        let right_len = self.right.width();

        let center_start = width.saturating_sub(center_len) / 2;
        let right_start = width.saturating_sub(right_len);

        let mut spans = vec![Span::styled(self.left.as_str(), style)];

        let left_padding = center_start.saturating_sub(left_len);
        if left_padding > 0 {
            spans.push(Span::raw(" ".repeat(left_padding)));
        }
        if !self.center.is_empty() {
            spans.push(Span::styled(self.center.as_str(), Style::default().fg(Color::Gray)));
        }

        let current_len = left_len + left_padding + center_len;
        let right_padding = right_start.saturating_sub(current_len);
        if right_padding > 0 {
            spans.push(Span::raw(" ".repeat(right_padding)));
        }
        if !self.right.is_empty() {
            spans.push(Span::styled(self.right.as_str(), style));
        }

        Line::from(spans)
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line(area.width as usize)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_fill_width() {
        let bar = StatusBar::new().left("/users").center("q quit").right("signed in");
        assert_eq!(bar.line(40).width(), 40);
    }

    #[test]
    fn test_wide_chars_counted_by_cell() {
        let bar = StatusBar::new().left("ユーザー").right("x");
        assert_eq!(bar.line(20).width(), 20);
    }
}
