//! Shared types for the meteo weather-station dashboard.
//!
//! This crate provides the data model used by both the HTTP client
//! (meteo-client) and the terminal frontend (meteo-cli):
//!
//! - [`Reading`]: one temperature/humidity sample, with lenient wire
//!   normalization
//! - [`AverageWindow`]: the 7/30-day averaging windows
//! - [`HistorySeries`]: the historical temperature series for the chart view
//! - [`ConnectionStatus`]: the status-indicator state machine vocabulary

pub mod types;

pub use types::{AverageWindow, ConnectionStatus, HistoryPoint, HistorySeries, Reading};
