// Dashboard view
//
// Entity count cards over a reservation volume chart. The chart cycles
// between daily, weekly and monthly bucketing with `g`.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(area);

    render_count_cards(f, chunks[0], app);
    render_series_chart(f, chunks[1], app);
}

fn render_count_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let counts = app.dashboard.counts.unwrap_or_default();
    render_card(f, cards[0], app, " Members ", counts.users, app.theme.info);
    render_card(
        f,
        cards[1],
        app,
        " Restaurants ",
        counts.restaurants,
        app.theme.ok,
    );
    render_card(
        f,
        cards[2],
        app,
        " Reservations ",
        counts.reservations,
        app.theme.highlight,
    );
    render_card(f, cards[3], app, " Reviews ", counts.reviews, app.theme.warn);
}

fn render_card(f: &mut Frame, area: Rect, app: &App, title: &str, value: u64, accent: Color) {
    let display = if app.dashboard.counts.is_none() && app.dashboard.counts_loading {
        app.spinner_char().to_string()
    } else {
        value.to_string()
    };

    let text = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
    ]);

    let card = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(title.to_string()),
    );
    f.render_widget(card, area);
}

fn render_series_chart(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Reservations · {} ", app.dashboard.granularity.label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(title)
        .title_bottom(Line::from(" g cycle granularity ").centered());

    if app.dashboard.series.is_empty() {
        let message = if app.dashboard.series_loading {
            format!("{} Loading…", app.spinner_char())
        } else {
            "No reservation data yet".to_string()
        };
        let placeholder = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let bars: Vec<Bar> = app
        .dashboard
        .series
        .iter()
        .map(|bucket| {
            Bar::default()
                .label(bucket.label.clone().into())
                .value(bucket.count)
                .style(Style::default().fg(app.theme.chart))
        })
        .collect();

    let max_value = app
        .dashboard
        .series
        .iter()
        .map(|bucket| bucket.count)
        .max()
        .unwrap_or(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(1)
        .max(max_value.max(1))
        .style(Style::default().fg(app.theme.foreground));

    f.render_widget(chart, area);
}
