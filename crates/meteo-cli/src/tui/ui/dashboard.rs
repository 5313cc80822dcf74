//! Dashboard panel rendering: the live reading cards and average tiles.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::tui::app::App;

use super::palette::BORDER_TYPE;

/// Draw the dashboard: two large reading cards and the averages row.
pub(super) fn draw_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Reading cards
            Constraint::Length(5), // Averages row
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);

    draw_temperature_card(frame, cards[0], app);
    draw_value_card(frame, cards[1], app, " Humidity ", &app.humidity_display());

    let averages = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    draw_average_tile(frame, averages[0], app, " 7-day avg ", &app.avg7_display());
    draw_average_tile(frame, averages[1], app, " 30-day avg ", &app.avg30_display());
}

/// The temperature card additionally shows the band marker.
fn draw_temperature_card(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let block = Block::bordered()
        .title(Span::styled(" Temperature ", palette.title_style()))
        .border_type(BORDER_TYPE)
        .border_style(palette.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.temperature_display(),
            palette.value_style(),
        )),
        Line::from(""),
    ];
    if let Some(marker) = app.band_marker() {
        lines.push(Line::from(Span::styled(
            format!("[{}]", marker),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(palette.card_bg)),
        inner,
    );
}

/// A plain large-value card.
fn draw_value_card(frame: &mut Frame, area: Rect, app: &App, title: &str, value: &str) {
    let palette = app.theme.palette();

    let block = Block::bordered()
        .title(Span::styled(title.to_string(), palette.title_style()))
        .border_type(BORDER_TYPE)
        .border_style(palette.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(value.to_string(), palette.value_style())),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(palette.card_bg)),
        inner,
    );
}

/// A small tile for a rolling average.
fn draw_average_tile(frame: &mut Frame, area: Rect, app: &App, title: &str, value: &str) {
    let palette = app.theme.palette();

    let block = Block::bordered()
        .title(Span::styled(title.to_string(), palette.label_style()))
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(palette.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new(Span::styled(value.to_string(), palette.value_style()))
            .alignment(Alignment::Center),
        inner,
    );
}
