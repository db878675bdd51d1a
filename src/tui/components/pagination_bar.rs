// Pagination bar component
//
// Renders the ten-page window under a list: group arrows on either side,
// page numbers between them, the current page inverted. Hidden entirely
// when the listing fits on one page.

use crate::state::Pagination;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the page window, or nothing when one page holds everything
pub fn render(f: &mut Frame, area: Rect, pagination: &Pagination, theme: &Theme) {
    if !pagination.needs_bar() {
        return;
    }

    let mut spans: Vec<Span> = Vec::new();

    if pagination.has_prev_group() {
        spans.push(Span::styled("◀ ", Style::default().fg(theme.info)));
    } else {
        spans.push(Span::raw("  "));
    }

    for page in pagination.window() {
        let label = format!(" {} ", page);
        if page == pagination.current_page() {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.muted)));
        }
    }

    if pagination.has_next_group() {
        spans.push(Span::styled(" ▶", Style::default().fg(theme.info)));
    } else {
        spans.push(Span::raw("  "));
    }

    let bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(bar, area);
}
