use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use tracing::warn;

const FALLBACK_ACCENT: Color = Color::Cyan;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub error_style: Style,
    pub success_style: Style,
    pub selection_style: Style,
    pub dimmed_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(FALLBACK_ACCENT)
    }
}

impl Theme {
    /// Builds a theme from a color name or hex code; unknown values fall back
    /// to cyan.
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        Self {
            accent,
            error_style: Style::default().fg(Color::Red),
            success_style: Style::default().fg(Color::Green),
            selection_style: Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
        }
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

fn parse_color(s: &str) -> Color {
    Color::from_str(s.trim()).unwrap_or_else(|_| {
        warn!(color = %s, "Unknown accent color, using default");
        FALLBACK_ACCENT
    })
}
