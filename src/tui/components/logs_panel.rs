//! Log tail under the active view, toggled with `L`.
//!
//! Always follows the newest entries; the full history stays available
//! in the log files when file logging is enabled.

use crate::logging::LogLevel;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the newest log entries that fit in the panel
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.tail(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let formatted = format!(
                "[{}] {:5} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.level.as_str(),
                entry.message
            );
            ListItem::new(formatted).style(log_level_style(&entry.level, app))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}

fn log_level_style(level: &LogLevel, app: &App) -> Style {
    let color = match level {
        LogLevel::Error => app.theme.log_error,
        LogLevel::Warn => app.theme.log_warn,
        LogLevel::Info => app.theme.log_info,
        LogLevel::Debug => app.theme.log_debug,
        LogLevel::Trace => app.theme.log_trace,
    };
    Style::default().fg(color)
}
