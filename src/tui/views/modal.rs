// Dialog overlays, drawn over the active view after everything else:
// - Help: keyboard shortcuts
// - Edit dialogs: member role, reservation fields, restaurant form
// - Confirm dialog: review deletion

use crate::tui::app::App;
use crate::tui::modal::{
    FormField, Modal, ReservationDraft, ReservationField, RestaurantForm, UserDraft,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Dispatch to the renderer for whichever dialog is open
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::EditUser(draft) => render_edit_user(f, app, draft),
        Modal::EditReservation(draft) => render_edit_reservation(f, app, draft),
        Modal::ConfirmDeleteReview { review_id } => render_confirm_delete(f, app, *review_id),
        Modal::AddRestaurant(form) => render_restaurant_form(f, app, form),
    }
}

/// A rect of the given percentage size, centered in `r`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Keybinding reference, grouped the way the screens use them
fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.info);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);

    // One aligned "key  description" line
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Views", header_style)),
        kb("1-6, F1-F6", "Jump to a screen"),
        kb("Tab", "Next screen"),
        kb("Shift+Tab", "Previous screen"),
        Line::raw(""),
        Line::from(Span::styled("  Navigation", header_style)),
        kb("↑/↓, j/k", "Move the cursor"),
        kb("←/→, h/l", "Previous / next page"),
        kb("[ / ]", "Previous / next page group"),
        Line::raw(""),
        Line::from(Span::styled("  Actions", header_style)),
        kb("Enter", "Edit row / pick restaurant"),
        kb("a", "Register restaurant"),
        kb("x", "Delete row"),
        kb("/", "Search (members, restaurants)"),
        kb("s", "Flip review order"),
        kb("g", "Cycle chart granularity"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("r", "Refresh current screen"),
        kb("L", "Toggle logs panel"),
        kb("T", "Toggle theme"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(app.theme_kind.name(), key_style),
        ]),
    ]);

    let height = (content.lines.len() as u16 + 2).min(f.area().height);
    let area = centered_rect(46, height, f.area());

    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Shared footer line: saving spinner or error, whichever applies
fn dialog_footer<'a>(app: &App, saving: bool, error: &Option<String>) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    if saving {
        lines.push(Line::from(Span::styled(
            format!("  {} Saving…", app.spinner_char()),
            Style::default().fg(app.theme.info),
        )));
    } else if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            format!("  ✗ {}", message),
            Style::default().fg(app.theme.danger),
        )));
    }
    lines
}

fn render_edit_user(f: &mut Frame, app: &App, draft: &UserDraft) {
    let muted = Style::default().fg(app.theme.muted);
    let value = Style::default().fg(app.theme.foreground);

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Username  ", muted),
            Span::styled(draft.user.user_name.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("  Name      ", muted),
            Span::styled(draft.user.name.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("  Email     ", muted),
            Span::styled(draft.user.email.clone(), value),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Role      ", muted),
            Span::styled(
                format!("◀ {} ▶", draft.user.user_type.as_str()),
                Style::default()
                    .fg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
    ];
    lines.extend(dialog_footer(app, draft.saving, &draft.error));

    let height = (lines.len() as u16 + 2).min(f.area().height);
    let area = centered_rect(52, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Edit member ")
                .title_bottom(
                    Line::from(" ←→ role │ ↵ save │ d delete │ Esc cancel ").centered(),
                ),
        );
    f.render_widget(paragraph, area);
}

fn render_edit_reservation(f: &mut Frame, app: &App, draft: &ReservationDraft) {
    let muted = Style::default().fg(app.theme.muted);

    let field_line = |label: &str, display: String, field: ReservationField| -> Line {
        let focused = draft.field == field;
        let marker = if focused { "▸ " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else if field == ReservationField::Status {
            Style::default().fg(super::reservations::status_color(draft.status, &app.theme))
        } else {
            Style::default().fg(app.theme.foreground)
        };
        let cursor = if focused && field != ReservationField::Status {
            "▌"
        } else {
            ""
        };
        Line::from(vec![
            Span::styled(format!("  {}{:<9}", marker, label), muted),
            Span::styled(format!("{}{}", display, cursor), value_style),
        ])
    };

    let status_display = format!("◀ {} ▶", draft.status.label());
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Reservation  ", muted),
            Span::styled(
                format!("#{}", draft.reservation.reservation_id),
                Style::default().fg(app.theme.foreground),
            ),
        ]),
        Line::raw(""),
        field_line("Status", status_display, ReservationField::Status),
        field_line("Time", draft.time_input.clone(), ReservationField::Time),
        field_line("Party", draft.people_input.clone(), ReservationField::People),
        field_line(
            "Request",
            draft.request_input.clone(),
            ReservationField::Request,
        ),
        Line::raw(""),
    ];
    lines.extend(dialog_footer(app, draft.saving, &draft.error));

    let height = (lines.len() as u16 + 2).min(f.area().height);
    let area = centered_rect(56, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Edit reservation ")
                .title_bottom(Line::from(" Tab field │ ↵ save │ Esc cancel ").centered()),
        );
    f.render_widget(paragraph, area);
}

fn render_confirm_delete(f: &mut Frame, app: &App, review_id: u64) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("Delete review #{}?", review_id),
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(app.theme.muted),
        )),
        Line::raw(""),
    ];

    let area = centered_rect(40, 6, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.danger))
                .border_type(app.theme.border_type)
                .title(" Confirm ")
                .title_bottom(Line::from(" y delete │ n keep ").centered()),
        );
    f.render_widget(paragraph, area);
}

fn form_field_display(form: &RestaurantForm, field: FormField) -> String {
    match field {
        FormField::Name => form.name.clone(),
        FormField::Description => form.description.clone(),
        FormField::Phone => form.phone.clone(),
        FormField::FoodType => format!("◀ {} ▶", form.food_type_label()),
        FormField::Seats => form.seats_input.clone(),
        FormField::Parking => {
            if form.parking {
                "yes".to_string()
            } else {
                "no".to_string()
            }
        }
        FormField::City => form.city.clone(),
        FormField::District => form.district.clone(),
        FormField::Neighborhood => form.neighborhood.clone(),
        FormField::RoadAddr => form.road_addr.clone(),
        FormField::JibunAddr => form.jibun_addr.clone(),
        FormField::DetailAddr => form.detail_addr.clone(),
    }
}

fn render_restaurant_form(f: &mut Frame, app: &App, form: &RestaurantForm) {
    if form.confirming && !form.saving {
        render_form_confirmation(f, app, form);
        return;
    }

    let muted = Style::default().fg(app.theme.muted);
    let toggle_fields = [FormField::FoodType, FormField::Parking];

    let mut lines = vec![Line::raw("")];
    for field in FormField::ALL {
        let focused = form.field == field;
        let marker = if focused { "▸ " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.foreground)
        };
        let cursor = if focused && !toggle_fields.contains(&field) {
            "▌"
        } else {
            ""
        };

        let mut spans = vec![
            Span::styled(format!("  {}{:<15}", marker, field.label()), muted),
            Span::styled(
                format!("{}{}", form_field_display(form, field), cursor),
                value_style,
            ),
        ];
        if field == FormField::Phone {
            if let Some(complaint) = &form.phone_error {
                spans.push(Span::styled(
                    format!("  {}", complaint),
                    Style::default().fg(app.theme.danger),
                ));
            }
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.extend(dialog_footer(app, form.saving, &form.error));

    let height = (lines.len() as u16 + 2).min(f.area().height);
    let area = centered_rect(60, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Register restaurant ")
                .title_bottom(
                    Line::from(" Tab field │ ←→ toggle │ ↵ register │ Esc cancel ").centered(),
                ),
        );
    f.render_widget(paragraph, area);
}

fn render_form_confirmation(f: &mut Frame, app: &App, form: &RestaurantForm) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("Register \"{}\"?", form.name.trim()),
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · {} seats", form.food_type_label(),
                if form.seats_input.is_empty() { "0" } else { form.seats_input.as_str() }),
            Style::default().fg(app.theme.muted),
        )),
        Line::raw(""),
    ];

    let area = centered_rect(44, 6, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Confirm ")
                .title_bottom(Line::from(" y register │ n back ").centered()),
        );
    f.render_widget(paragraph, area);
}
