//! Message types for TUI communication between UI and worker tasks.
//!
//! - [`Command`]: messages sent from the UI loop to the background worker
//! - [`StationEvent`]: events sent from the worker back to the UI loop

use meteo_types::{HistorySeries, Reading};

/// Commands sent from the UI loop to the background worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start periodic refreshing.
    Start,

    /// Stop periodic refreshing (terminal lost focus, user paused).
    Stop,

    /// Restart the refresh cadence from now.
    Restart,

    /// Fetch a reading immediately, outside the periodic cadence.
    TickNow,

    /// Fetch the temperature history for a day window.
    FetchHistory {
        /// Window length in days.
        days: u32,
    },

    /// Shut down the worker task.
    Shutdown,
}

/// Events sent from the background worker to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum StationEvent {
    /// A live reading arrived.
    Reading(Reading),

    /// Both rolling averages settled.
    Averages {
        avg7: Option<f64>,
        avg30: Option<f64>,
    },

    /// The live fetch failed after retries.
    FetchFailed(String),

    /// A history fetch completed.
    History {
        days: u32,
        series: HistorySeries,
    },

    /// A history fetch failed.
    HistoryFailed(String),
}
