//! Application state for the TUI dashboard.
//!
//! [`App`] holds everything the render pass reads: the latest reading, the
//! rolling averages, the connection status, the history series, and the
//! active color palette. State changes only through [`App::handle_event`]
//! and the input actions, so every display rule is testable without a
//! terminal.

use time::OffsetDateTime;
use time::format_description::OwnedFormatItem;

use meteo_client::Thresholds;
use meteo_types::{ConnectionStatus, HistorySeries, Reading};

use crate::config::{Config, StatusMessages};
use crate::format;

use super::messages::StationEvent;
use super::ui::palette::ThemeSelector;

/// Tabs available in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    History,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::History => "History",
        }
    }
}

/// TUI application state.
pub struct App {
    /// Latest reading; empty slots render as the placeholder.
    pub reading: Reading,
    /// Rolling 7-day temperature average.
    pub avg7: Option<f64>,
    /// Rolling 30-day temperature average.
    pub avg30: Option<f64>,
    /// Status indicator state.
    pub status: ConnectionStatus,
    /// When the last successful reading arrived.
    pub last_update: Option<OffsetDateTime>,
    /// Last fetch error, shown in the status bar.
    pub last_error: Option<String>,
    /// History series for the chart tab, once fetched.
    pub history: Option<HistorySeries>,
    /// Day window of the displayed (or requested) history.
    pub history_days: u32,
    /// Last history fetch error.
    pub history_error: Option<String>,
    /// Active tab.
    pub active_tab: Tab,
    /// Whether refreshing is paused (focus loss or user request).
    pub paused: bool,
    /// Active temperature-band theme.
    pub theme: ThemeSelector,

    thresholds: Thresholds,
    placeholder: String,
    messages: StatusMessages,
    time_format: Option<OwnedFormatItem>,
    should_quit: bool,
}

impl App {
    /// Create the application state from config.
    pub fn new(config: &Config) -> Self {
        Self {
            reading: Reading::EMPTY,
            avg7: None,
            avg30: None,
            status: ConnectionStatus::Connecting,
            last_update: None,
            last_error: None,
            history: None,
            history_days: config.history_days,
            history_error: None,
            active_tab: Tab::Dashboard,
            paused: false,
            theme: ThemeSelector::default(),
            thresholds: Thresholds::new(config.thresholds),
            placeholder: config.placeholder.clone(),
            messages: config.messages.clone(),
            time_format: format::parse_time_format(&config.time_format),
            should_quit: false,
        }
    }

    /// Apply an event from the background worker.
    pub fn handle_event(&mut self, event: StationEvent) {
        match event {
            StationEvent::Reading(reading) => {
                self.reading = reading;
                self.status = ConnectionStatus::Connected;
                self.last_error = None;
                self.last_update = Some(OffsetDateTime::now_utc());
                // A missing temperature keeps the current band.
                if let Some(t) = reading.temperature {
                    self.theme.apply(self.thresholds.evaluate(t));
                }
            }
            StationEvent::Averages { avg7, avg30 } => {
                self.avg7 = avg7;
                self.avg30 = avg30;
            }
            StationEvent::FetchFailed(message) => {
                self.reading = Reading::EMPTY;
                self.status = ConnectionStatus::Error;
                self.last_error = Some(message);
            }
            StationEvent::History { days, series } => {
                self.history_days = days;
                self.history = Some(series);
                self.history_error = None;
            }
            StationEvent::HistoryFailed(message) => {
                self.history_error = Some(message);
            }
        }
    }

    // --- Display accessors ---

    pub fn temperature_display(&self) -> String {
        format::format_temp(self.reading.temperature, &self.placeholder)
    }

    pub fn humidity_display(&self) -> String {
        format::format_humidity(self.reading.humidity, &self.placeholder)
    }

    pub fn avg7_display(&self) -> String {
        format::format_average(self.avg7, &self.placeholder)
    }

    pub fn avg30_display(&self) -> String {
        format::format_average(self.avg30, &self.placeholder)
    }

    /// The "last update" line, or the waiting message before the first
    /// reading.
    pub fn last_update_display(&self) -> String {
        match (self.last_update, &self.time_format) {
            (Some(ts), Some(fmt)) => format::last_update_line(ts, fmt),
            _ => self.messages.waiting.clone(),
        }
    }

    /// Message text for the current connection status.
    pub fn status_message(&self) -> &str {
        match self.status {
            ConnectionStatus::Connecting => &self.messages.connecting,
            ConnectionStatus::Connected => &self.messages.connected,
            ConnectionStatus::Error => &self.messages.error,
        }
    }

    /// Band marker for the temperature card. Cleared while the temperature
    /// is missing.
    pub fn band_marker(&self) -> Option<&'static str> {
        self.reading.temperature.map(|_| self.theme.band().name())
    }

    // --- Lifecycle ---

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn next_tab(&mut self) {
        self.active_tab = match self.active_tab {
            Tab::Dashboard => Tab::History,
            Tab::History => Tab::Dashboard,
        };
    }

    /// Change the history window. Returns true when it actually changed and
    /// a refetch is warranted.
    pub fn set_history_days(&mut self, days: u32) -> bool {
        if self.history_days == days && self.history.is_some() {
            return false;
        }
        self.history_days = days;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo_client::TempBand;

    fn app() -> App {
        App::new(&Config::default())
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.status, ConnectionStatus::Connecting);
        assert_eq!(app.temperature_display(), "--");
        assert_eq!(app.humidity_display(), "--");
        assert_eq!(app.avg7_display(), "--");
        assert_eq!(app.last_update_display(), "Waiting for data...");
    }

    #[test]
    fn test_reading_updates_slots_and_status() {
        let mut app = app();
        app.handle_event(StationEvent::Reading(Reading::new(21.34, 55.7)));

        assert_eq!(app.temperature_display(), "21.3°C");
        assert_eq!(app.humidity_display(), "56%");
        assert_eq!(app.status, ConnectionStatus::Connected);
        assert!(app.last_update.is_some());
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_partial_reading_keeps_placeholder() {
        let mut app = app();
        app.handle_event(StationEvent::Reading(Reading {
            temperature: None,
            humidity: Some(48.0),
        }));

        assert_eq!(app.temperature_display(), "--");
        assert_eq!(app.humidity_display(), "48%");
        assert_eq!(app.status, ConnectionStatus::Connected);
    }

    #[test]
    fn test_theme_follows_temperature_band() {
        let mut app = app();
        assert_eq!(app.theme.band(), TempBand::Comfort);

        app.handle_event(StationEvent::Reading(Reading::new(31.0, 40.0)));
        assert_eq!(app.theme.band(), TempBand::Hot);

        app.handle_event(StationEvent::Reading(Reading::new(12.0, 40.0)));
        assert_eq!(app.theme.band(), TempBand::Cold);
    }

    #[test]
    fn test_missing_temperature_keeps_band() {
        let mut app = app();
        app.handle_event(StationEvent::Reading(Reading::new(31.0, 40.0)));
        assert_eq!(app.theme.band(), TempBand::Hot);

        app.handle_event(StationEvent::Reading(Reading {
            temperature: None,
            humidity: Some(50.0),
        }));
        assert_eq!(app.theme.band(), TempBand::Hot);
    }

    #[test]
    fn test_band_marker_follows_temperature() {
        let mut app = app();
        assert_eq!(app.band_marker(), None);

        app.handle_event(StationEvent::Reading(Reading::new(21.34, 55.7)));
        assert_eq!(app.band_marker(), Some("comfort"));

        // A null temperature clears the marker without changing the theme.
        app.handle_event(StationEvent::Reading(Reading {
            temperature: None,
            humidity: Some(50.0),
        }));
        assert_eq!(app.band_marker(), None);
        assert_eq!(app.theme.band(), TempBand::Comfort);
    }

    #[test]
    fn test_status_message_text() {
        let mut app = app();
        assert_eq!(app.status_message(), "Connecting...");

        app.handle_event(StationEvent::Reading(Reading::new(21.0, 50.0)));
        assert_eq!(app.status_message(), "Connected");

        app.handle_event(StationEvent::FetchFailed("timeout".into()));
        assert_eq!(app.status_message(), "Connection error");
    }

    #[test]
    fn test_fetch_failure_clears_slots() {
        let mut app = app();
        app.handle_event(StationEvent::Reading(Reading::new(21.0, 50.0)));
        app.handle_event(StationEvent::FetchFailed("HTTP error: status 500".into()));

        assert_eq!(app.temperature_display(), "--");
        assert_eq!(app.humidity_display(), "--");
        assert_eq!(app.status, ConnectionStatus::Error);
        assert_eq!(app.last_error.as_deref(), Some("HTTP error: status 500"));
    }

    #[test]
    fn test_failure_does_not_clear_averages() {
        let mut app = app();
        app.handle_event(StationEvent::Averages {
            avg7: Some(21.8),
            avg30: Some(20.4),
        });
        app.handle_event(StationEvent::FetchFailed("timeout".into()));

        assert_eq!(app.avg7_display(), "21.8°C");
        assert_eq!(app.avg30_display(), "20.4°C");
    }

    #[test]
    fn test_recovery_after_failure() {
        let mut app = app();
        app.handle_event(StationEvent::FetchFailed("timeout".into()));
        app.handle_event(StationEvent::Reading(Reading::new(20.0, 45.0)));

        assert_eq!(app.status, ConnectionStatus::Connected);
        assert!(app.last_error.is_none());
        assert_eq!(app.temperature_display(), "20.0°C");
    }

    #[test]
    fn test_history_events() {
        let mut app = app();
        app.handle_event(StationEvent::History {
            days: 30,
            series: HistorySeries::default(),
        });
        assert_eq!(app.history_days, 30);
        assert!(app.history.is_some());

        app.handle_event(StationEvent::HistoryFailed("boom".into()));
        assert_eq!(app.history_error.as_deref(), Some("boom"));
        // A failed refetch keeps the last good series on screen.
        assert!(app.history.is_some());
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = app();
        assert_eq!(app.active_tab, Tab::Dashboard);
        app.next_tab();
        assert_eq!(app.active_tab, Tab::History);
        app.next_tab();
        assert_eq!(app.active_tab, Tab::Dashboard);
    }

    #[test]
    fn test_set_history_days() {
        let mut app = app();
        // No series yet, so even the same window warrants a fetch.
        assert!(app.set_history_days(7));

        app.handle_event(StationEvent::History {
            days: 7,
            series: HistorySeries::default(),
        });
        assert!(!app.set_history_days(7));
        assert!(app.set_history_days(30));
    }
}
