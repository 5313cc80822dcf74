//! Retry logic for API requests.
//!
//! The station API is served from a small embedded backend that can be slow
//! to answer while the database is busy; transient failures on the primary
//! reading fetch are retried with exponential backoff. Average fetches are
//! never retried; their failures are absorbed to `None` at the client
//! boundary instead.
//!
//! # Example
//!
//! ```
//! use meteo_client::{RetryConfig, with_retry, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! let config = RetryConfig::new(3);
//!
//! let value = with_retry(&config, "fetch_current", || async {
//!     Ok::<_, Error>(42)
//! }).await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 means no retries).
    pub max_retries: u32,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Maximum delay between retries (for exponential backoff).
    pub max_delay: Duration,
    /// Backoff multiplier (1.0 = constant delay, 2.0 = double each time).
    pub backoff_multiplier: f64,
    /// Whether to add jitter to delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(2000),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a retry config with custom attempt count.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// No retries: a single attempt whose failure propagates directly.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Set the initial delay.
    #[must_use]
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Enable or disable jitter.
    #[must_use]
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Calculate delay for a given attempt number.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay =
            self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(attempt as i32);
        let capped_delay = base_delay.min(self.max_delay.as_secs_f64());

        let final_delay = if self.jitter {
            // Up to 25% jitter so parallel clients don't hammer in lockstep
            let jitter_factor = 1.0 + (rand::rng().random::<f64>() * 0.25);
            capped_delay * jitter_factor
        } else {
            capped_delay
        };

        Duration::from_secs_f64(final_delay)
    }
}

/// Execute an async operation with retry logic.
///
/// Returns the result of the operation, or the last error if all retries
/// failed. Non-retryable errors propagate immediately.
pub async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("{} succeeded after {} retries", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if !is_retryable(&e) {
                    return Err(e);
                }

                last_error = Some(e);

                if attempt < config.max_retries {
                    let delay = config.delay_for_attempt(attempt);
                    warn!(
                        "{} failed (attempt {}/{}), retrying in {:?}",
                        operation_name,
                        attempt + 1,
                        config.max_retries + 1,
                        delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::invalid_config("operation failed with no error")))
}

/// Check if an error is retryable.
fn is_retryable(error: &Error) -> bool {
    match error {
        // Timeouts and transport failures are usually transient
        Error::Timeout { .. } => true,
        Error::NetworkUnreachable(_) => true,
        // Server-side failures may recover; client errors will not
        Error::HttpError { status } => *status >= 500,
        // A superseded request must stay cancelled
        Error::Cancelled => false,
        // Configuration problems are fatal, not transient
        Error::InvalidUrl(_) => false,
        Error::InvalidConfig(_) => false,
    }
}
