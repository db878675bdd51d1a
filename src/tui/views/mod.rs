// Views module - screen-level rendering logic
//
// Each view is a full-screen experience within the console:
// - Dashboard: entity counts and the reservation volume chart
// - Users: member listing with role editing
// - Restaurants: restaurant listing, registration and selection
// - Reservations / Reviews / Reports: scoped to the selected restaurant
//
// This module builds the shell (title, content, optional logs, status),
// gates the content on the session verdict, then dispatches to the view.

mod dashboard;
mod modal;
mod reports;
mod reservations;
mod restaurants;
mod reviews;
mod users;

use super::app::{App, AdminView};
use crate::session::SessionStatus;
use crate::tui::components;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Apply theme background to the entire frame
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(10)];
    if app.show_logs {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);
    let content_area = chunks[1];
    if app.show_logs {
        components::render_logs_panel(f, chunks[2], app);
        components::render_status(f, chunks[3], app);
    } else {
        components::render_status(f, chunks[2], app);
    }

    // The content is gated on the session verdict; the shell stays up so
    // the status bar and logs remain readable either way
    match app.session.status() {
        SessionStatus::Pending => render_session_pending(f, content_area, app),
        SessionStatus::Invalid => render_session_invalid(f, content_area, app),
        SessionStatus::Valid => match app.view {
            AdminView::Dashboard => dashboard::render(f, content_area, app),
            AdminView::Users => users::render(f, content_area, app),
            AdminView::Restaurants => restaurants::render(f, content_area, app),
            AdminView::Reservations => reservations::render(f, content_area, app),
            AdminView::Reviews => reviews::render(f, content_area, app),
            AdminView::Reports => reports::render(f, content_area, app),
        },
    }

    // Render modal overlay (on top of everything)
    // Take modal temporarily to avoid borrow conflict with mutable app
    if let Some(modal_state) = app.modal.take() {
        modal::render(f, &modal_state, app);
        app.modal = Some(modal_state);
    }

    // Render toast notification (on top of modal too)
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    app.clear_expired_toast();
}

/// No authenticated response yet: show the spinner instead of data
fn render_session_pending(f: &mut Frame, area: Rect, app: &App) {
    let text = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("{} Checking session…", app.spinner_char()),
            Style::default().fg(app.theme.info),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "The first response from the platform decides whether the",
            Style::default().fg(app.theme.muted),
        )),
        Line::from(Span::styled(
            "saved token is still good.",
            Style::default().fg(app.theme.muted),
        )),
    ]);

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(paragraph, area);
}

/// The backend rejected the token: point the admin back at the login page
fn render_session_invalid(f: &mut Frame, area: Rect, app: &App) {
    let text = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Session rejected",
            Style::default()
                .fg(app.theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Log in from the browser console, then relaunch with the",
            Style::default().fg(app.theme.foreground),
        )),
        Line::from(Span::styled(
            "command it prints:",
            Style::default().fg(app.theme.foreground),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            app.config.login_url.clone(),
            Style::default()
                .fg(app.theme.info)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "maitred --token <jwt>",
            Style::default().fg(app.theme.highlight),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "r retries with the current token · q quits",
            Style::default().fg(app.theme.muted),
        )),
    ]);

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.danger))
            .title(" Login required "),
    );
    f.render_widget(paragraph, area);
}

/// Search line shown above a list while the keyword filter is being edited
fn render_search_line(f: &mut Frame, area: Rect, app: &App, buffer: &str) {
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(app.theme.muted)),
        Span::styled(buffer.to_string(), Style::default().fg(app.theme.foreground)),
        Span::styled("▌", Style::default().fg(app.theme.highlight)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight))
            .title_bottom(Line::from(" ↵ apply │ Esc cancel ").centered()),
    );
    f.render_widget(paragraph, area);
}

/// Centered placeholder for empty or still-loading lists
fn render_list_placeholder(f: &mut Frame, area: Rect, app: &App, loading: bool, empty_text: &str) {
    let message = if loading {
        format!("{} Loading…", app.spinner_char())
    } else {
        empty_text.to_string()
    };
    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.muted));

    let y = area.y + area.height / 3;
    let centered = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    f.render_widget(paragraph, centered);
}

/// One-line restaurant header for the dependent screens. Blank until the
/// detail fetch for the selected restaurant lands.
fn render_restaurant_header(f: &mut Frame, area: Rect, app: &App) {
    let Some(ref detail) = app.detail else {
        return;
    };
    let r = &detail.restaurant;
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", r.name),
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· {} {} {}", r.city, r.district, r.neighborhood),
            Style::default().fg(app.theme.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Placeholder for the dependent screens before a restaurant is picked
fn render_needs_selection(f: &mut Frame, area: Rect, app: &App, what: &str) {
    let text = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("No restaurant selected for {}", what),
            Style::default().fg(app.theme.warn),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Open Restaurants (3) and press Enter on one.",
            Style::default().fg(app.theme.muted),
        )),
    ]);

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(paragraph, area);
}
