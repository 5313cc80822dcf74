//! History panel rendering: the temperature line chart.

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph};

use crate::tui::app::App;

use super::palette::BORDER_TYPE;

/// Draw the history panel with the temperature chart.
pub(super) fn draw_history_panel(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let title = format!(" History ({} days) ", app.history_days);
    let block = Block::bordered()
        .title(Span::styled(title, palette.title_style()))
        .border_type(BORDER_TYPE)
        .border_style(palette.border_style());

    if let Some(error) = &app.history_error {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("History unavailable: {}", error),
                Style::default().fg(Color::Rgb(220, 38, 38)),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press 7 or 3 to retry",
                palette.label_style(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let Some(series) = app.history.as_ref().filter(|s| !s.is_empty()) else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No history data available",
                palette.label_style(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", palette.label_style()),
                Span::styled(
                    "7",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" or ", palette.label_style()),
                Span::styled(
                    "3",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to load a window", palette.label_style()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    };

    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.temperature))
        .collect();

    // Pad the Y bounds so the line never hugs the frame.
    let (min, max) = series.temperature_bounds().unwrap_or((0.0, 1.0));
    let pad = ((max - min) * 0.1).max(0.5);
    let y_bounds = [min - pad, max + pad];

    let x_labels = vec![
        Span::styled(series.points[0].label.clone(), palette.label_style()),
        Span::styled(
            series.points[series.len() - 1].label.clone(),
            palette.label_style(),
        ),
    ];
    let y_labels = vec![
        Span::styled(format!("{:.1}", y_bounds[0]), palette.label_style()),
        Span::styled(
            format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0),
            palette.label_style(),
        ),
        Span::styled(format!("{:.1}", y_bounds[1]), palette.label_style()),
    ];

    let dataset = Dataset::default()
        .name(format!("°C over {} days", app.history_days))
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.chart_line))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .style(Style::default().bg(palette.chart_bg))
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.text_secondary))
                .bounds([0.0, (series.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.text_secondary))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
