//! HTTP client and refresh engine for the meteo weather-station API.
//!
//! This crate talks to the small REST backend exposed by the station and
//! drives the periodic refresh cycle the dashboard runs on.
//!
//! # Features
//!
//! - **Live readings**: `/data/live` with lenient body normalization and
//!   supersede-on-refresh cancellation
//! - **Rolling averages**: `/data/average/{days}` for the 7 and 30 day
//!   windows, failures absorbed to `None`
//! - **History**: `/data/history/{days}` temperature series for the chart
//! - **Refresh engine**: fixed-period polling with start/stop/restart
//!   lifecycle and retrying primary fetches
//! - **Temperature bands**: the cold/comfort/warm/hot classification the
//!   frontend themes itself by
//! - **Mock station**: in-memory [`StationDataSource`] with failure
//!   injection for tests
//!
//! # Quick Start
//!
//! ```no_run
//! use meteo_client::StationClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StationClient::new("http://localhost:8000", Duration::from_secs(10))?;
//!
//!     let reading = client.fetch_current().await?;
//!     println!("temperature: {:?}", reading.temperature);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod controller;
pub mod error;
pub mod mock;
pub mod retry;
pub mod thresholds;
pub mod traits;

pub use client::StationClient;
pub use controller::{RefreshController, TickOutcome};
pub use error::{Error, Result};
pub use mock::MockStation;
pub use retry::{RetryConfig, with_retry};
pub use thresholds::{HumidityThresholds, TempBand, ThresholdConfig, Thresholds};
pub use traits::StationDataSource;

// Re-export the data model for downstream convenience
pub use meteo_types::{AverageWindow, ConnectionStatus, HistoryPoint, HistorySeries, Reading};
