// Reusable pieces of the console shell
//
// The title bar and status bar frame every screen, the pagination bar
// sits under each list, the logs panel tails recent events and toasts
// float over whatever is showing.

pub mod logs_panel;
pub mod pagination_bar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;

use crate::state::Pagination;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Title bar across the top of the screen
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Status line along the bottom
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Page window under a list
pub fn render_pagination(f: &mut Frame, area: Rect, pagination: &Pagination, theme: &Theme) {
    pagination_bar::render(f, area, pagination, theme);
}

/// Log tail below the active view
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    logs_panel::render(f, area, app);
}
