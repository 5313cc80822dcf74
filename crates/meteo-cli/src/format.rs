//! Display formatting for sensor values.
//!
//! Temperatures show one decimal place, humidity rounds to a whole percent,
//! and anything missing renders as the configured placeholder. These rules
//! apply everywhere a value reaches the screen, both in the TUI and in the
//! one-shot commands.

use time::OffsetDateTime;
use time::format_description::OwnedFormatItem;

/// Format a temperature with one decimal place, e.g. `21.3°C`.
pub fn format_temp(value: Option<f64>, placeholder: &str) -> String {
    match value {
        Some(t) => format!("{:.1}°C", t),
        None => placeholder.to_string(),
    }
}

/// Format a humidity value as a whole percent, e.g. `56%`.
pub fn format_humidity(value: Option<f64>, placeholder: &str) -> String {
    match value {
        Some(h) => format!("{}%", h.round() as i64),
        None => placeholder.to_string(),
    }
}

/// Format a rolling average; same rules as a live temperature.
pub fn format_average(value: Option<f64>, placeholder: &str) -> String {
    format_temp(value, placeholder)
}

/// Parse a `time` format description once, for reuse on every render.
pub fn parse_time_format(format: &str) -> Option<OwnedFormatItem> {
    time::format_description::parse_owned::<2>(format).ok()
}

/// Format the "last update" timestamp line.
pub fn last_update_line(timestamp: OffsetDateTime, format: &OwnedFormatItem) -> String {
    timestamp
        .format(format)
        .map(|t| format!("Last update: {}", t))
        .unwrap_or_else(|_| "Last update: -".to_string())
}
