//! Presentation layer with screens, widgets and event handling.

/// Event handling.
pub mod events;
/// Color theme.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use theme::Theme;
pub use ui::App;
