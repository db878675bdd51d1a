// Reports view
//
// Read-only listing of review reports filed against the selected
// restaurant. Handling happens elsewhere in the platform; the console
// shows the queue and each report's processing state.

use crate::api::models::Report;
use crate::tui::app::App;
use crate::tui::components;
use crate::util::pad_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.handoff.get().is_none() {
        super::render_needs_selection(f, area, app, "reports");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    super::render_restaurant_header(f, chunks[0], app);
    render_list(f, chunks[1], app);
    components::render_pagination(f, chunks[2], &app.reports.pagination, &app.theme);
}

/// The backend stores the processing state as free text; only the two
/// states the operators actually set get a color
fn status_badge_color(status: &str, app: &App) -> Color {
    match status {
        "처리중" => app.theme.warn,
        "완료" => app.theme.ok,
        _ => app.theme.muted,
    }
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Reports ")
        .title_bottom(Line::from(" ←→ page │ [ ] group ").centered());

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let header_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let rows_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);

    let header = format!(
        " {} {} {} {} {} {}",
        pad_to_width("ID", 6),
        pad_to_width("REPORTER", 14),
        pad_to_width("STATUS", 10),
        pad_to_width("DATE", 13),
        pad_to_width("REASON", 16),
        "REPORTED REVIEW"
    );
    f.render_widget(
        Paragraph::new(header).style(
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::BOLD),
        ),
        header_area,
    );

    if app.reports.rows.is_empty() {
        super::render_list_placeholder(
            f,
            rows_area,
            app,
            app.reports.loading,
            "No reports for this restaurant",
        );
        return;
    }

    let height = rows_area.height as usize;
    let offset = if app.reports.cursor >= height {
        app.reports.cursor + 1 - height
    } else {
        0
    };

    let items: Vec<ListItem> = app
        .reports
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, report)| row_item(report, app, i == app.reports.cursor))
        .collect();

    f.render_widget(List::new(items), rows_area);
}

fn row_item<'a>(report: &Report, app: &App, selected: bool) -> ListItem<'a> {
    let id = pad_to_width(&format!("#{}", report.report_id), 6);
    let reporter = pad_to_width(&report.user_name, 14);
    // Fresh reports can arrive before an operator sets a processing state
    let status_text = if report.status.is_empty() {
        "알 수 없음"
    } else {
        report.status.as_str()
    };
    let status = pad_to_width(status_text, 10);
    let date = pad_to_width(&report.created_at.format("%b %d, %Y").to_string(), 13);
    let reason = pad_to_width(&report.reason, 16);

    if selected {
        return ListItem::new(format!(
            " {} {} {} {} {} {}",
            id, reporter, status, date, reason, report.review_content
        ))
        .style(
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection)
                .add_modifier(Modifier::BOLD),
        );
    }

    ListItem::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(id, Style::default().fg(app.theme.muted)),
        Span::raw(" "),
        Span::styled(reporter, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(
            status,
            Style::default().fg(status_badge_color(&report.status, app)),
        ),
        Span::raw(" "),
        Span::styled(date, Style::default().fg(app.theme.muted)),
        Span::raw(" "),
        Span::styled(reason, Style::default().fg(app.theme.warn)),
        Span::raw(" "),
        Span::styled(
            report.review_content.clone(),
            Style::default().fg(app.theme.muted),
        ),
    ]))
}
