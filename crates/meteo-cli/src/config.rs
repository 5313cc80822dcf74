//! Configuration file management.
//!
//! Settings live in `~/.config/meteo/config.toml` (or the platform
//! equivalent). Every field has a default, so a missing or partial file is
//! fine; a file that parses but fails validation aborts startup instead of
//! silently running against a bad endpoint.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use meteo_client::{HumidityThresholds, RetryConfig, ThresholdConfig};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the weather-station API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Refresh period for the dashboard, in milliseconds.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Per-request timeout, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// History window shown on startup, in days.
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Placeholder shown for missing values.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Format for the last-update line, in `time` format-description syntax.
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Status indicator message strings.
    #[serde(default)]
    pub messages: StatusMessages,

    /// Retry behavior for the live fetch.
    #[serde(default)]
    pub retry: RetrySettings,

    /// Temperature band boundaries.
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Humidity comfort boundaries (informational).
    #[serde(default)]
    pub humidity: HumidityThresholds,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_refresh_interval_ms() -> u64 {
    5000
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_history_days() -> u32 {
    7
}

fn default_placeholder() -> String {
    "--".to_string()
}

fn default_time_format() -> String {
    "[hour]:[minute]:[second]".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_interval_ms: default_refresh_interval_ms(),
            timeout_ms: default_timeout_ms(),
            history_days: default_history_days(),
            placeholder: default_placeholder(),
            time_format: default_time_format(),
            messages: StatusMessages::default(),
            retry: RetrySettings::default(),
            thresholds: ThresholdConfig::default(),
            humidity: HumidityThresholds::default(),
        }
    }
}

/// Status indicator message strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessages {
    /// Shown while waiting for the first response.
    #[serde(default = "default_msg_connecting")]
    pub connecting: String,

    /// Shown next to the indicator once readings arrive.
    #[serde(default = "default_msg_connected")]
    pub connected: String,

    /// Shown next to the indicator after a failed fetch.
    #[serde(default = "default_msg_error")]
    pub error: String,

    /// Shown in place of the last-update line before the first reading.
    #[serde(default = "default_msg_waiting")]
    pub waiting: String,
}

fn default_msg_connecting() -> String {
    "Connecting...".to_string()
}

fn default_msg_connected() -> String {
    "Connected".to_string()
}

fn default_msg_error() -> String {
    "Connection error".to_string()
}

fn default_msg_waiting() -> String {
    "Waiting for data...".to_string()
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            connecting: default_msg_connecting(),
            connected: default_msg_connected(),
            error: default_msg_error(),
            waiting: default_msg_waiting(),
        }
    }
}

/// Retry settings for the live fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Maximum retry attempts after the initial fetch (0 disables retries).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial delay between retries, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meteo")
            .join("config.toml")
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from a specific path, or return default if not found
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Unusable settings (bad URL, non-increasing thresholds, an unparseable
    /// time format) are fatal. Suspicious but workable ones only warn.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            bail!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            );
        }

        self.thresholds
            .validate()
            .context("invalid [thresholds] section")?;
        self.humidity
            .validate()
            .context("invalid [humidity] section")?;

        time::format_description::parse(&self.time_format)
            .with_context(|| format!("invalid time_format: {}", self.time_format))?;

        for warning in self.warnings() {
            tracing::warn!("{}", warning);
        }

        Ok(())
    }

    /// Non-fatal findings surfaced as startup warnings.
    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.refresh_interval_ms < 1000 {
            warnings.push(format!(
                "refresh interval of {} ms is very short and may overload the station",
                self.refresh_interval_ms
            ));
        }
        if self.timeout_ms < self.refresh_interval_ms {
            warnings.push(format!(
                "request timeout ({} ms) is shorter than the refresh interval ({} ms)",
                self.timeout_ms, self.refresh_interval_ms
            ));
        }
        warnings
    }

    /// Refresh period as a [`Duration`].
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Retry config for the live fetch, derived from [`RetrySettings`].
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(self.retry.max_retries)
            .initial_delay(Duration::from_millis(self.retry.delay_ms))
    }
}
