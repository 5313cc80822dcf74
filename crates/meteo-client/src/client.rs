//! HTTP client for the weather-station REST API.
//!
//! This module provides a client for the three sensor endpoints:
//! `/data/live`, `/data/average/{days}`, and `/data/history/{days}`.
//!
//! The live fetch carries two guarantees the dashboard relies on:
//!
//! - Starting a new live fetch cancels the previous in-flight one, so a slow
//!   response can never land after a fresher one and overwrite it.
//! - A well-formed HTTP response with a malformed body is not an error; it
//!   normalizes to a [`Reading`] with null fields.
//!
//! # Example
//!
//! ```no_run
//! use meteo_client::StationClient;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = StationClient::new("http://localhost:8000", Duration::from_secs(10))?;
//!
//! let reading = client.fetch_current().await?;
//! println!("temperature: {:?}", reading.temperature);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use meteo_types::{AverageWindow, HistorySeries, Reading};

use crate::error::{Error, Result};
use crate::traits::StationDataSource;

/// HTTP client for the weather-station API.
#[derive(Debug)]
pub struct StationClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    /// Token for the in-flight live fetch, cancelled when a newer one starts.
    live_fetch: Mutex<Option<CancellationToken>>,
}

impl StationClient {
    /// Create a new station client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the station API (e.g., "http://localhost:8000")
    /// * `timeout` - Per-request wait bound; an exceeded request aborts with
    ///   [`Error::Timeout`]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Self::validate_url(base_url)?;

        let client = Client::builder()
            .build()
            .map_err(Error::NetworkUnreachable)?;

        Ok(Self {
            client,
            base_url,
            timeout,
            live_fetch: Mutex::new(None),
        })
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, timeout: Duration, client: Client) -> Result<Self> {
        let base_url = Self::validate_url(base_url)?;
        Ok(Self {
            client,
            base_url,
            timeout,
            live_fetch: Mutex::new(None),
        })
    }

    /// Normalize and validate a base URL (scheme check, trailing slash trim).
    fn validate_url(base_url: &str) -> Result<String> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current reading from `/data/live`.
    ///
    /// Cancels any previous in-flight live fetch before starting. The
    /// superseded request resolves to [`Error::Cancelled`], which callers
    /// discard silently.
    pub async fn fetch_current(&self) -> Result<Reading> {
        let token = CancellationToken::new();
        {
            let mut guard = self.live_fetch.lock().await;
            if let Some(previous) = guard.replace(token.clone()) {
                previous.cancel();
            }
        }

        let url = format!("{}/data/live", self.base_url);
        let result = tokio::select! {
            _ = token.cancelled() => Err(Error::Cancelled),
            result = self.get_json(&url) => result.map(|body| Reading::from_wire(&body)),
        };

        // If our token was cancelled, a newer fetch already owns the slot.
        // Otherwise the slot still holds our token and can be cleared.
        {
            let mut guard = self.live_fetch.lock().await;
            if !token.is_cancelled() {
                *guard = None;
            }
        }

        result
    }

    /// Fetch a rolling average from `/data/average/{days}`.
    ///
    /// Infallible by contract: every failure collapses to `None` so a broken
    /// averages endpoint can never take down the live display.
    pub async fn fetch_average(&self, window: AverageWindow) -> Option<f64> {
        let url = format!("{}/data/average/{}", self.base_url, window.days());
        match self.get_json(&url).await {
            Ok(body) => {
                let value = body.get("temp_avg").and_then(|v| v.as_f64());
                if value.is_none() {
                    debug!(window = %window, "average body had no numeric temp_avg");
                }
                value.filter(|v| v.is_finite())
            }
            Err(e) => {
                debug!(window = %window, error = %e, "average fetch failed");
                None
            }
        }
    }

    /// Fetch the temperature history from `/data/history/{days}`.
    pub async fn fetch_history(&self, days: u32) -> Result<HistorySeries> {
        let url = format!("{}/data/history/{}", self.base_url, days);
        let body = self.get_json(&url).await?;
        Ok(HistorySeries::from_wire(&body))
    }

    /// GET a URL and parse the body as JSON, within the configured timeout.
    ///
    /// A success status with an unparseable body yields `Value::Null`, which
    /// the wire normalizers turn into an empty reading or series.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let request = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        Error::timeout(self.timeout)
                    } else {
                        Error::NetworkUnreachable(e)
                    }
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::http(status.as_u16()));
            }

            Ok(response
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null))
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl StationDataSource for StationClient {
    async fn fetch_current(&self) -> Result<Reading> {
        StationClient::fetch_current(self).await
    }

    async fn fetch_average(&self, window: AverageWindow) -> Option<f64> {
        StationClient::fetch_average(self, window).await
    }

    async fn fetch_history(&self, days: u32) -> Result<HistorySeries> {
        StationClient::fetch_history(self, days).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StationClient::new("http://localhost:8000", Duration::from_secs(10));
        assert!(client.is_ok());

        let client = client.unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_normalizes_url() {
        let client =
            StationClient::new("http://localhost:8000/", Duration::from_secs(10)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = StationClient::new("localhost:8000", Duration::from_secs(10));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        let result = StationClient::new("ftp://localhost:8000", Duration::from_secs(10));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Reserved TEST-NET-1 address, nothing listens there.
        let client =
            StationClient::new("http://192.0.2.1:9", Duration::from_millis(100)).unwrap();
        match client.fetch_current().await {
            Err(Error::Timeout { .. }) | Err(Error::NetworkUnreachable(_)) => {}
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    /// Accept connections and hold them open without ever answering, so an
    /// in-flight request stays pending until cancelled or timed out.
    async fn silent_server() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_new_live_fetch_cancels_predecessor() {
        let addr = silent_server().await;
        let client = std::sync::Arc::new(
            StationClient::new(&format!("http://{addr}"), Duration::from_millis(500)).unwrap(),
        );

        let first = tokio::spawn({
            let client = std::sync::Arc::clone(&client);
            async move { client.fetch_current().await }
        });
        // Let the first request register its token and go pending.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = client.fetch_current().await;

        // The superseded call resolves Cancelled well before its timeout;
        // the replacement runs to completion against the silent server.
        match first.await.unwrap() {
            Err(Error::Cancelled) => {}
            other => panic!("expected superseded fetch to cancel, got {other:?}"),
        }
        assert!(matches!(second, Err(Error::Timeout { .. })));
    }
}
