// Reviews view
//
// Review listing for the selected restaurant, sortable by creation date.
// `x` asks for confirmation before the delete goes out.

use crate::api::models::{Review, SortOrder};
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
    if app.handoff.get().is_none() {
        super::render_needs_selection(f, area, app, "reviews");
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
    components::render_pagination(f, chunks[2], &app.reviews.pagination, &app.theme);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let order = match app.review_order {
        SortOrder::Desc => "newest first",
        SortOrder::Asc => "oldest first",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(format!(" Reviews · {} ", order))
        .title_bottom(Line::from(" x delete │ s flip order │ ←→ page ").centered());

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let header_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let rows_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);

    let header = format!(
        " {} {} {} {} {}",
        pad_to_width("ID", 6),
        pad_to_width("MEMBER", 14),
        pad_to_width("RATING", 7),
        pad_to_width("DATE", 13),
        "REVIEW"
    );
    f.render_widget(
        Paragraph::new(header).style(
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::BOLD),
        ),
        header_area,
    );

    if app.reviews.rows.is_empty() {
        super::render_list_placeholder(
            f,
            rows_area,
            app,
            app.reviews.loading,
            "No reviews for this restaurant",
        );
        return;
    }

    let height = rows_area.height as usize;
    let offset = if app.reviews.cursor >= height {
        app.reviews.cursor + 1 - height
    } else {
        0
    };

    let items: Vec<ListItem> = app
        .reviews
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, review)| row_item(review, app, i == app.reviews.cursor))
        .collect();

    f.render_widget(List::new(items), rows_area);
}

fn stars(rating: f64) -> String {
    let filled = (rating.round().clamp(0.0, 5.0)) as usize;
    let mut out = "★".repeat(filled);
    out.push_str(&"☆".repeat(5 - filled));
    out
}

fn row_item<'a>(review: &Review, app: &App, selected: bool) -> ListItem<'a> {
    let id = pad_to_width(&format!("#{}", review.review_id), 6);
    let member = match &review.user_name {
        Some(name) => pad_to_width(name, 14),
        None => pad_to_width("anonymous", 14),
    };
    let rating = pad_to_width(&stars(review.rating), 7);
    let date = pad_to_width(
        &review.created_at.format("%b %d, %Y").to_string(),
        13,
    );

    if selected {
        return ListItem::new(format!(
            " {} {} {} {} {}",
            id, member, rating, date, review.review_content
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
        Span::styled(member, Style::default().fg(app.theme.foreground)),
        Span::raw(" "),
        Span::styled(rating, Style::default().fg(app.theme.warn)),
        Span::raw(" "),
        Span::styled(date, Style::default().fg(app.theme.muted)),
        Span::raw(" "),
        Span::styled(
            review.review_content.clone(),
            Style::default().fg(app.theme.foreground),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_rounding() {
        assert_eq!(stars(4.6), "★★★★★");
        assert_eq!(stars(3.2), "★★★☆☆");
        assert_eq!(stars(0.0), "☆☆☆☆☆");
    }

    #[test]
    fn test_stars_out_of_range_is_clamped() {
        assert_eq!(stars(9.0), "★★★★★");
        assert_eq!(stars(-1.0), "☆☆☆☆☆");
    }
}
