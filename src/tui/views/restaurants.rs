// Restaurants view
//
// Paginated restaurant listing with a name filter. Enter hands the
// highlighted restaurant to the dependent screens and jumps to its
// reservations; `a` opens the registration form.

use crate::api::models::Restaurant;
use crate::tui::app::App;
use crate::tui::components;
use crate::util::pad_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
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
    components::render_pagination(f, chunks[next + 1], &app.restaurants.pagination, &app.theme);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.restaurants_keyword.is_empty() {
        " Restaurants ".to_string()
    } else {
        format!(" Restaurants · \"{}\" ", app.restaurants_keyword)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(title)
        .title_bottom(Line::from(" ↵ reservations │ a add │ / search │ ←→ page ").centered());

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
        pad_to_width("NAME", 22),
        pad_to_width("TYPE", 8),
        pad_to_width("SEATS", 5),
        pad_to_width("PARK", 4),
        "LOCATION"
    );
    f.render_widget(
        Paragraph::new(header).style(
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::BOLD),
        ),
        header_area,
    );

    if app.restaurants.rows.is_empty() {
        super::render_list_placeholder(
            f,
            rows_area,
            app,
            app.restaurants.loading,
            "No restaurants found",
        );
        return;
    }

    let height = rows_area.height as usize;
    let offset = if app.restaurants.cursor >= height {
        app.restaurants.cursor + 1 - height
    } else {
        0
    };

    let items: Vec<ListItem> = app
        .restaurants
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, restaurant)| row_item(restaurant, app, i == app.restaurants.cursor))
        .collect();

    f.render_widget(List::new(items), rows_area);
}

fn row_item<'a>(restaurant: &Restaurant, app: &App, selected: bool) -> ListItem<'a> {
    let id = pad_to_width(&restaurant.restaurant_id.to_string(), 6);
    let name = pad_to_width(&restaurant.name, 22);
    let food_type = pad_to_width(&restaurant.food_type, 8);
    let seats = pad_to_width(&restaurant.total_seats.to_string(), 5);
    let parking = if restaurant.parking_available { "P" } else { "-" };
    let parking = pad_to_width(parking, 4);
    let location = format!("{} {}", restaurant.city, restaurant.district);

    if selected {
        return ListItem::new(format!(
            " {} {} {} {} {} {}",
            id, name, food_type, seats, parking, location
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
        Span::styled(name, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(food_type, Style::default().fg(app.theme.info)),
        Span::raw(" "),
        Span::styled(seats, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(parking, Style::default().fg(app.theme.muted)),
        Span::raw(" "),
        Span::styled(location, Style::default().fg(app.theme.muted)),
    ]))
}
