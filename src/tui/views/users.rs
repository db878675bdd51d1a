// Members view
//
// Paginated member listing with a keyword filter. Enter opens the role
// editor; deletion lives inside that dialog.

use crate::api::models::{User, UserType};
use crate::tui::app::App;
use crate::tui::components;
use crate::util::pad_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut constraints = Vec::new();
    if app.search.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    if let Some(buffer) = &app.search {
        super::render_search_line(f, chunks[next], app, buffer);
        next += 1;
    }
    render_list(f, chunks[next], app);
    components::render_pagination(f, chunks[next + 1], &app.users.pagination, &app.theme);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.users_keyword.is_empty() {
        " Members ".to_string()
    } else {
        format!(" Members · \"{}\" ", app.users_keyword)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(title)
        .title_bottom(Line::from(" ↵ edit │ / search │ ←→ page │ [ ] group ").centered());

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let header_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let rows_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);

    let header = format!(
        " {} {} {} {}",
        pad_to_width("USERNAME", 16),
        pad_to_width("NAME", 16),
        pad_to_width("EMAIL", 28),
        "ROLE"
    );
    f.render_widget(
        ratatui::widgets::Paragraph::new(header).style(
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::BOLD),
        ),
        header_area,
    );

    if app.users.rows.is_empty() {
        super::render_list_placeholder(f, rows_area, app, app.users.loading, "No members found");
        return;
    }

    let height = rows_area.height as usize;
    let offset = if app.users.cursor >= height {
        app.users.cursor + 1 - height
    } else {
        0
    };

    let items: Vec<ListItem> = app
        .users
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, user)| row_item(user, app, i == app.users.cursor))
        .collect();

    f.render_widget(List::new(items), rows_area);
}

fn row_item<'a>(user: &User, app: &App, selected: bool) -> ListItem<'a> {
    let username = pad_to_width(&user.user_name, 16);
    let name = pad_to_width(&user.name, 16);
    let email = pad_to_width(&user.email, 28);
    let role = user.user_type.as_str();

    if selected {
        return ListItem::new(format!(" {} {} {} {}", username, name, email, role)).style(
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection)
                .add_modifier(Modifier::BOLD),
        );
    }

    let role_color = match user.user_type {
        UserType::Admin => app.theme.danger,
        UserType::Owner => app.theme.warn,
        UserType::Customer => app.theme.info,
    };

    ListItem::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(username, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(name, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(email, Style::default().fg(app.theme.muted)),
        Span::raw(" "),
        Span::styled(role.to_string(), Style::default().fg(role_color)),
    ]))
}
