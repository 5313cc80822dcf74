//! Trait abstractions for weather-station data sources.
//!
//! This module provides the [`StationDataSource`] trait that abstracts over
//! the real HTTP client and mock stations for testing.

use async_trait::async_trait;

use meteo_types::{AverageWindow, HistorySeries, Reading};

use crate::error::Result;

/// Trait abstracting access to the weather-station API.
///
/// This trait enables writing code that works with both the real HTTP client
/// and mock stations for testing. The refresh controller is generic over it,
/// so every polling-loop test can run against a [`crate::MockStation`] with
/// the tokio clock paused.
///
/// # Example
///
/// ```ignore
/// use meteo_client::{StationDataSource, Result};
///
/// async fn print_reading<S: StationDataSource>(station: &S) -> Result<()> {
///     let reading = station.fetch_current().await?;
///     println!("temperature: {:?}", reading.temperature);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StationDataSource: Send + Sync {
    /// Fetch the current temperature/humidity sample.
    ///
    /// A well-formed but incomplete body yields a [`Reading`] with null
    /// fields rather than an error; only transport, timeout, and HTTP
    /// status failures raise.
    async fn fetch_current(&self) -> Result<Reading>;

    /// Fetch the rolling temperature average for a window.
    ///
    /// Infallible by contract: any failure (network, status, malformed or
    /// non-numeric body) collapses to `None`.
    async fn fetch_average(&self, window: AverageWindow) -> Option<f64>;

    /// Fetch the historical temperature series for the last `days` days.
    async fn fetch_history(&self, days: u32) -> Result<HistorySeries>;
}
