// Reservations view
//
// Reservation listing for the selected restaurant. Enter opens the editor
// for status, time, party size and request note; `x` deletes outright.

use crate::api::models::{Reservation, ReservationStatus};
use crate::tui::app::App;
use crate::tui::components;
use crate::tui::theme::Theme;
use crate::util::pad_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.handoff.get().is_none() {
        super::render_needs_selection(f, area, app, "reservations");
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
    components::render_pagination(f, chunks[2], &app.reservations.pagination, &app.theme);
}

/// Status color: settled states green, in-flight states yellow, dead
/// states red
pub(super) fn status_color(status: ReservationStatus, theme: &Theme) -> ratatui::style::Color {
    match status {
        ReservationStatus::Confirmed | ReservationStatus::Complete => theme.ok,
        ReservationStatus::Pending
        | ReservationStatus::Reserving
        | ReservationStatus::CancelRequest => theme.warn,
        ReservationStatus::Cancelled | ReservationStatus::NoShow => theme.danger,
    }
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Reservations ")
        .title_bottom(Line::from(" ↵ edit │ x delete │ ←→ page │ [ ] group ").centered());

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
        pad_to_width("GUEST", 14),
        pad_to_width("TIME", 12),
        pad_to_width("PPL", 4),
        pad_to_width("STATUS", 16),
        "REQUEST"
    );
    f.render_widget(
        Paragraph::new(header).style(
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::BOLD),
        ),
        header_area,
    );

    if app.reservations.rows.is_empty() {
        super::render_list_placeholder(
            f,
            rows_area,
            app,
            app.reservations.loading,
            "No reservations for this restaurant",
        );
        return;
    }

    let height = rows_area.height as usize;
    let offset = if app.reservations.cursor >= height {
        app.reservations.cursor + 1 - height
    } else {
        0
    };

    let items: Vec<ListItem> = app
        .reservations
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, reservation)| row_item(reservation, app, i == app.reservations.cursor))
        .collect();

    f.render_widget(List::new(items), rows_area);
}

fn row_item<'a>(reservation: &Reservation, app: &App, selected: bool) -> ListItem<'a> {
    let id = pad_to_width(&format!("#{}", reservation.reservation_id), 6);
    // the guest account can be gone while its reservation lingers
    let guest = match &reservation.user {
        Some(user) => pad_to_width(&user.name, 14),
        None => pad_to_width("N/A", 14),
    };
    let time = pad_to_width(
        &reservation.reservation_time.format("%m-%d %H:%M").to_string(),
        12,
    );
    let people = pad_to_width(&reservation.number_of_people.to_string(), 4);
    let status = pad_to_width(reservation.status.label(), 16);

    if selected {
        return ListItem::new(format!(
            " {} {} {} {} {} {}",
            id, guest, time, people, status, reservation.request
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
        Span::styled(guest, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(time, Style::default().fg(app.theme.info)),
        Span::raw(" "),
        Span::styled(people, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(
            status,
            Style::default().fg(status_color(reservation.status, &app.theme)),
        ),
        Span::raw(" "),
        Span::styled(reservation.request.clone(), Style::default().fg(app.theme.muted)),
    ]))
}
