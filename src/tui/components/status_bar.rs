// Bottom status line: uptime, session verdict, API target and where the
// operator is (screen, page, row count).

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let page_info = match app.active_pagination() {
        Some(p) if p.total_pages() > 0 => {
            format!(" │ page {}/{}", p.current_page(), p.total_pages())
        }
        _ => String::new(),
    };

    let rows_info = match app.active_row_count() {
        Some(count) => format!(" │ {} rows", count),
        None => String::new(),
    };

    let status_text = format!(
        " {} │ session {} │ {} │ {}{}{}",
        app.uptime(),
        app.session.status().as_str(),
        app.config.api_url,
        app.view.name(),
        page_info,
        rows_info,
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
