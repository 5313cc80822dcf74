//! Main UI layout and rendering for the TUI dashboard.
//!
//! The layout consists of:
//!
//! - **Header**: title and connection status indicator
//! - **Tab bar**: Dashboard and History tabs
//! - **Main content**: reading cards or the history chart
//! - **Status bar**: last-update line, key hints, pause indicator

pub mod palette;

mod dashboard;
mod history;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Tabs};

use meteo_types::ConnectionStatus;

use super::app::{App, Tab};
use palette::BORDER_TYPE;

/// Draw the complete TUI interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();

    // Whole-screen band background
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_primary)),
        frame.area(),
    );

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app);
    draw_tab_bar(frame, main_layout[1], app);

    match app.active_tab {
        Tab::Dashboard => dashboard::draw_dashboard(frame, main_layout[2], app),
        Tab::History => history::draw_history_panel(frame, main_layout[2], app),
    }

    draw_status_bar(frame, main_layout[3], app);
}

/// Status indicator dot and color for the header.
fn status_indicator(status: ConnectionStatus, palette: &palette::Palette) -> (&'static str, Color) {
    match status {
        ConnectionStatus::Connected => ("●", palette.accent),
        ConnectionStatus::Connecting => ("◌", palette.text_secondary),
        ConnectionStatus::Error => ("●", Color::Rgb(220, 38, 38)), // red-600
    }
}

/// Draw the header bar with title and status indicator.
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.palette();
    let (dot, dot_color) = status_indicator(app.status, &palette);

    let mut spans = vec![
        Span::styled(
            " Meteo Station ",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(dot, Style::default().fg(dot_color)),
        Span::styled(
            format!(" {} ", app.status_message()),
            Style::default().fg(palette.text_secondary),
        ),
    ];

    if app.paused {
        spans.push(Span::styled(
            " [paused] ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(palette.bg_secondary));
    frame.render_widget(header, area);
}

/// Draw the tab bar.
fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let titles: Vec<Line> = [Tab::Dashboard, Tab::History]
        .iter()
        .map(|t| Line::from(t.title()))
        .collect();
    let selected = match app.active_tab {
        Tab::Dashboard => 0,
        Tab::History => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(palette.text_secondary))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::bordered()
                .border_type(BORDER_TYPE)
                .border_style(palette.border_style()),
        );
    frame.render_widget(tabs, area);
}

/// Draw the status bar with last-update line, errors, and key hints.
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let left = match &app.last_error {
        Some(error) => Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Rgb(220, 38, 38)),
        ),
        None => Span::styled(
            format!(" {} ", app.last_update_display()),
            Style::default().fg(palette.text_secondary),
        ),
    };

    let hints = " q quit | r refresh | p pause | Tab view | 7/3 window ";
    let padding = (area.width as usize)
        .saturating_sub(left.content.len() + hints.len());

    let line = Line::from(vec![
        left,
        Span::raw(" ".repeat(padding)),
        Span::styled(hints, palette.muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.bg_secondary)),
        area,
    );
}
