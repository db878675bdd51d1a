// Title bar: app name, active screen, a spinner while that screen is
// fetching, and the restaurant the dependent screens are scoped to.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// App name and screen context, with a `?` hint in the corner
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let loading_indicator = if app.current_view_loading() {
        format!(" {} loading", app.spinner_char())
    } else {
        String::new()
    };

    let title_text = match app.selected_restaurant_name() {
        Some(name) if app.view.is_dependent() => {
            format!(
                " 🍽 Maître d'{} ──── {} · {}",
                loading_indicator,
                app.view.name(),
                name
            )
        }
        _ => format!(" 🍽 Maître d'{} ──── {}", loading_indicator, app.view.name()),
    };

    let accent = Style::default().fg(app.theme.title);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(accent)
        .title_top(Line::from(" ? ").right_aligned());

    f.render_widget(
        Paragraph::new(title_text)
            .style(accent.add_modifier(Modifier::BOLD))
            .block(block),
        area,
    );
}
