//! UI screens.

mod app;
mod home_screen;
mod login_screen;
mod register_screen;
mod user_form_screen;
mod user_list_screen;

pub use app::App;
pub use home_screen::HomeScreen;
pub use login_screen::LoginScreen;
pub use register_screen::RegisterScreen;
pub use user_form_screen::{UserFormMode, UserFormScreen};
pub use user_list_screen::UserListScreen;

use ratatui::layout::{Constraint, Layout, Rect};

use crate::domain::{Route, UserId};

/// What a screen asks the app to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Quit,
    Navigate(Route),
    Submit,
    Delete(UserId),
    Refresh,
    Logout,
}

/// Centers a box of at most `width` x `height` cells inside `area`.
#[must_use]
pub fn centered_area(width: u16, height: u16, area: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, centered, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(vertical);
    centered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_area_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let centered = centered_area(50, 10, area);
        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 10);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 15);
    }

    #[test]
    fn test_centered_area_clamps_to_parent() {
        let area = Rect::new(0, 0, 30, 5);
        let centered = centered_area(50, 10, area);
        assert_eq!(centered, area);
    }
}
