//! Mock station implementation for testing.
//!
//! This module provides a mock data source that can be used for unit testing
//! without a running backend.
//!
//! The [`MockStation`] implements the [`StationDataSource`] trait, allowing
//! it to be used interchangeably with the real HTTP client in generic code.
//!
//! # Features
//!
//! - **Failure injection**: fail every fetch, or only the next N fetches
//! - **Latency simulation**: add artificial delays to simulate a slow backend
//! - **Call counters**: assert how many times each endpoint was hit

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use meteo_types::{AverageWindow, HistoryPoint, HistorySeries, Reading};

use crate::error::{Error, Result};
use crate::traits::StationDataSource;

/// A mock weather station for testing.
///
/// Implements the [`StationDataSource`] trait for use in generic code and
/// testing.
///
/// # Example
///
/// ```
/// use meteo_client::{MockStation, StationDataSource};
/// use meteo_types::Reading;
///
/// #[tokio::main]
/// async fn main() {
///     let station = MockStation::new();
///     station.set_reading(Reading::new(21.3, 55.0)).await;
///
///     let reading = station.fetch_current().await.unwrap();
///     assert_eq!(reading.temperature, Some(21.3));
/// }
/// ```
pub struct MockStation {
    reading: RwLock<Reading>,
    averages: RwLock<HashMap<u16, f64>>,
    history: RwLock<HistorySeries>,
    should_fail: AtomicBool,
    fail_status: AtomicU32,
    /// Number of fetches to fail before succeeding again.
    remaining_failures: AtomicU32,
    /// Simulated fetch latency in milliseconds (0 = no delay).
    fetch_latency_ms: AtomicU64,
    current_calls: AtomicU32,
    average_calls: AtomicU32,
    history_calls: AtomicU32,
}

impl std::fmt::Debug for MockStation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStation")
            .field("should_fail", &self.should_fail.load(Ordering::Relaxed))
            .field("current_calls", &self.current_calls.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockStation {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStation {
    /// Create a new mock station with a comfortable default reading.
    pub fn new() -> Self {
        let mut averages = HashMap::new();
        averages.insert(7, 21.8);
        averages.insert(30, 20.4);

        Self {
            reading: RwLock::new(Reading::new(22.5, 50.0)),
            averages: RwLock::new(averages),
            history: RwLock::new(Self::default_history()),
            should_fail: AtomicBool::new(false),
            fail_status: AtomicU32::new(0),
            remaining_failures: AtomicU32::new(0),
            fetch_latency_ms: AtomicU64::new(0),
            current_calls: AtomicU32::new(0),
            average_calls: AtomicU32::new(0),
            history_calls: AtomicU32::new(0),
        }
    }

    fn default_history() -> HistorySeries {
        HistorySeries {
            points: vec![
                HistoryPoint {
                    label: "01/06 00h".to_string(),
                    temperature: 19.5,
                },
                HistoryPoint {
                    label: "01/06 12h".to_string(),
                    temperature: 23.1,
                },
                HistoryPoint {
                    label: "02/06 00h".to_string(),
                    temperature: 20.2,
                },
            ],
        }
    }

    async fn check_should_fail(&self) -> Result<()> {
        let latency = self.fetch_latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        // Transient failures first
        if self.remaining_failures.load(Ordering::Relaxed) > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(self.current_error());
        }

        if self.should_fail.load(Ordering::Relaxed) {
            Err(self.current_error())
        } else {
            Ok(())
        }
    }

    fn current_error(&self) -> Error {
        match self.fail_status.load(Ordering::Relaxed) {
            0 => Error::timeout(Duration::from_secs(10)),
            status => Error::http(status as u16),
        }
    }

    // --- Test control methods ---

    /// Set the reading returned by [`StationDataSource::fetch_current`].
    pub async fn set_reading(&self, reading: Reading) {
        *self.reading.write().await = reading;
    }

    /// Set the average returned for a window, or remove it with `None`.
    pub async fn set_average(&self, window: AverageWindow, value: Option<f64>) {
        let mut averages = self.averages.write().await;
        match value {
            Some(v) => {
                averages.insert(window.days(), v);
            }
            None => {
                averages.remove(&window.days());
            }
        }
    }

    /// Set the history series returned for any window.
    pub async fn set_history(&self, series: HistorySeries) {
        *self.history.write().await = series;
    }

    /// Make every fetch fail with a timeout until cleared.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if !fail {
            self.fail_status.store(0, Ordering::Relaxed);
        }
    }

    /// Make every fetch fail with the given HTTP status until cleared.
    pub fn fail_with_status(&self, status: u16) {
        self.fail_status.store(status as u32, Ordering::Relaxed);
        self.should_fail.store(true, Ordering::Relaxed);
    }

    /// Fail the next `count` fetches, then succeed again.
    pub fn fail_next(&self, count: u32) {
        self.remaining_failures.store(count, Ordering::Relaxed);
    }

    /// Set simulated fetch latency.
    ///
    /// Every fetch operation will be delayed by this duration.
    /// Set to `Duration::ZERO` to disable latency simulation.
    pub fn set_fetch_latency(&self, latency: Duration) {
        self.fetch_latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of `fetch_current` calls performed.
    pub fn current_calls(&self) -> u32 {
        self.current_calls.load(Ordering::Relaxed)
    }

    /// Number of `fetch_average` calls performed.
    pub fn average_calls(&self) -> u32 {
        self.average_calls.load(Ordering::Relaxed)
    }

    /// Number of `fetch_history` calls performed.
    pub fn history_calls(&self) -> u32 {
        self.history_calls.load(Ordering::Relaxed)
    }

    /// Reset all call counters.
    pub fn reset_calls(&self) {
        self.current_calls.store(0, Ordering::Relaxed);
        self.average_calls.store(0, Ordering::Relaxed);
        self.history_calls.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl StationDataSource for MockStation {
    async fn fetch_current(&self) -> Result<Reading> {
        self.current_calls.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail().await?;
        Ok(*self.reading.read().await)
    }

    async fn fetch_average(&self, window: AverageWindow) -> Option<f64> {
        self.average_calls.fetch_add(1, Ordering::Relaxed);
        if self.check_should_fail().await.is_err() {
            return None;
        }
        self.averages.read().await.get(&window.days()).copied()
    }

    async fn fetch_history(&self, days: u32) -> Result<HistorySeries> {
        let _ = days;
        self.history_calls.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail().await?;
        Ok(self.history.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_reading() {
        let station = MockStation::new();
        let reading = station.fetch_current().await.unwrap();
        assert_eq!(reading.temperature, Some(22.5));
        assert_eq!(reading.humidity, Some(50.0));
        assert_eq!(station.current_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let station = MockStation::new();
        station.set_should_fail(true);
        assert!(station.fetch_current().await.is_err());

        station.set_should_fail(false);
        assert!(station.fetch_current().await.is_ok());
    }

    #[tokio::test]
    async fn test_fail_with_status() {
        let station = MockStation::new();
        station.fail_with_status(503);

        match station.fetch_current().await {
            Err(Error::HttpError { status }) => assert_eq!(status, 503),
            other => panic!("expected HTTP 503, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transient_failures() {
        let station = MockStation::new();
        station.fail_next(2);

        assert!(station.fetch_current().await.is_err());
        assert!(station.fetch_current().await.is_err());
        assert!(station.fetch_current().await.is_ok());
    }

    #[tokio::test]
    async fn test_average_absorbs_failures() {
        let station = MockStation::new();
        assert_eq!(station.fetch_average(AverageWindow::Seven).await, Some(21.8));

        station.set_should_fail(true);
        assert_eq!(station.fetch_average(AverageWindow::Seven).await, None);
        assert_eq!(station.average_calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_average_window() {
        let station = MockStation::new();
        station.set_average(AverageWindow::Thirty, None).await;
        assert_eq!(station.fetch_average(AverageWindow::Thirty).await, None);
        assert_eq!(station.fetch_average(AverageWindow::Seven).await, Some(21.8));
    }

    #[tokio::test]
    async fn test_history() {
        let station = MockStation::new();
        let series = station.fetch_history(7).await.unwrap();
        assert_eq!(series.points.len(), 3);
        assert_eq!(station.history_calls(), 1);
    }
}
