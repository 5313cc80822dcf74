//! Periodic refresh engine for the dashboard.
//!
//! The [`RefreshController`] owns the polling cadence: it ticks at a fixed
//! period while running, fetches the live reading (with retry), and only on
//! success fetches both rolling averages concurrently. Outcomes stream to the
//! frontend over an mpsc channel, so rendering code never awaits the network.
//!
//! Lifecycle rules:
//!
//! - `start` on a running controller is a no-op, `stop` on an idle one too.
//! - `restart` resets the tick phase; the next tick lands one full period
//!   after the restart.
//! - The first fetch of a session comes from an explicit [`RefreshController::tick_now`],
//!   not from the interval, so callers control whether starting implies an
//!   immediate fetch.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use meteo_types::{AverageWindow, Reading};

use crate::error::Error;
use crate::retry::{RetryConfig, with_retry};
use crate::traits::StationDataSource;

/// Result of one refresh tick, streamed to the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The live fetch succeeded.
    Reading(Reading),
    /// Both average fetches settled (each may individually be missing).
    Averages {
        avg7: Option<f64>,
        avg30: Option<f64>,
    },
    /// The live fetch failed after retries; averages were skipped.
    Failed(String),
}

/// Drives periodic refreshes against a [`StationDataSource`].
pub struct RefreshController<S> {
    station: Arc<S>,
    period: Duration,
    retry: RetryConfig,
    outcome_tx: mpsc::Sender<TickOutcome>,
    ticker: Option<JoinHandle<()>>,
}

impl<S> std::fmt::Debug for RefreshController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshController")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}

impl<S> RefreshController<S> {
    /// Whether the periodic ticker is active.
    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop periodic ticking. No-op if idle.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!("refresh stopped");
        }
    }
}

impl<S: StationDataSource + 'static> RefreshController<S> {
    /// Create a controller in the idle state.
    ///
    /// Returns the controller and the receiving end of its outcome stream.
    pub fn new(
        station: Arc<S>,
        period: Duration,
        retry: RetryConfig,
    ) -> (Self, mpsc::Receiver<TickOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::channel(32);
        (
            Self {
                station,
                period,
                retry,
                outcome_tx,
                ticker: None,
            },
            outcome_rx,
        )
    }

    /// Start periodic ticking. No-op if already running.
    ///
    /// The first interval tick fires one full period from now; use
    /// [`Self::tick_now`] for an immediate fetch.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        debug!(period = ?self.period, "refresh started");
        let station = Arc::clone(&self.station);
        let retry = self.retry.clone();
        let tx = self.outcome_tx.clone();
        let period = self.period;

        self.ticker = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                run_tick(station.as_ref(), &retry, &tx).await;
            }
        }));
    }

    /// Reset the tick phase: the next periodic tick lands one full period
    /// from now.
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Run a single tick immediately, outside the periodic cadence.
    pub async fn tick_now(&self) {
        run_tick(self.station.as_ref(), &self.retry, &self.outcome_tx).await;
    }
}

impl<S> Drop for RefreshController<S> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

/// One refresh: live reading first, then both averages, skipped on failure.
async fn run_tick<S: StationDataSource>(
    station: &S,
    retry: &RetryConfig,
    tx: &mpsc::Sender<TickOutcome>,
) {
    match with_retry(retry, "fetch_current", || station.fetch_current()).await {
        Ok(reading) => {
            if tx.send(TickOutcome::Reading(reading)).await.is_err() {
                return;
            }
            let (avg7, avg30) = tokio::join!(
                station.fetch_average(AverageWindow::Seven),
                station.fetch_average(AverageWindow::Thirty),
            );
            let _ = tx.send(TickOutcome::Averages { avg7, avg30 }).await;
        }
        // A superseded fetch has a fresher sibling in flight; stay quiet.
        Err(Error::Cancelled) => {}
        Err(e) => {
            let _ = tx.send(TickOutcome::Failed(e.to_string())).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStation;

    fn controller(
        station: Arc<MockStation>,
        period_ms: u64,
    ) -> (RefreshController<MockStation>, mpsc::Receiver<TickOutcome>) {
        RefreshController::new(
            station,
            Duration::from_millis(period_ms),
            RetryConfig::none(),
        )
    }

    /// Let spawned tasks run to their next await point.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_now_emits_reading_then_averages() {
        let station = Arc::new(MockStation::new());
        let (ctrl, mut rx) = controller(Arc::clone(&station), 5000);

        ctrl.tick_now().await;

        match rx.recv().await.unwrap() {
            TickOutcome::Reading(reading) => assert_eq!(reading.temperature, Some(22.5)),
            other => panic!("expected reading first, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            TickOutcome::Averages { avg7, avg30 } => {
                assert_eq!(avg7, Some(21.8));
                assert_eq!(avg30, Some(20.4));
            }
            other => panic!("expected averages second, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_skips_averages() {
        let station = Arc::new(MockStation::new());
        station.fail_with_status(404);
        let (ctrl, mut rx) = controller(Arc::clone(&station), 5000);

        ctrl.tick_now().await;

        match rx.recv().await.unwrap() {
            TickOutcome::Failed(message) => assert!(message.contains("404")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(station.average_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_retried() {
        let station = Arc::new(MockStation::new());
        station.fail_next(1);

        let retry = RetryConfig::new(2)
            .initial_delay(Duration::from_millis(10))
            .jitter(false);
        let (ctrl, mut rx) =
            RefreshController::new(Arc::clone(&station), Duration::from_secs(5), retry);

        ctrl.tick_now().await;

        assert!(matches!(
            rx.recv().await.unwrap(),
            TickOutcome::Reading(_)
        ));
        assert_eq!(station.current_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticks_after_one_period() {
        let station = Arc::new(MockStation::new());
        let (mut ctrl, mut rx) = controller(Arc::clone(&station), 5000);

        ctrl.start();
        assert!(ctrl.is_running());

        // No tick at t=0; the first interval tick fires a full period in.
        settle().await;
        assert_eq!(station.current_calls(), 0);

        let outcome = rx.recv().await.unwrap();
        assert!(matches!(outcome, TickOutcome::Reading(_)));
        assert!(station.current_calls() >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let station = Arc::new(MockStation::new());
        let (mut ctrl, mut rx) = controller(Arc::clone(&station), 5000);

        ctrl.start();
        ctrl.start();

        // One reading then one averages outcome per tick, never interleaved
        // double readings from a second ticker.
        assert!(matches!(
            rx.recv().await.unwrap(),
            TickOutcome::Reading(_)
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            TickOutcome::Averages { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticking() {
        let station = Arc::new(MockStation::new());
        let (mut ctrl, mut rx) = controller(Arc::clone(&station), 5000);

        ctrl.start();
        rx.recv().await.unwrap();
        ctrl.stop();
        assert!(!ctrl.is_running());

        while rx.try_recv().is_ok() {}
        let calls = station.current_calls();

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;

        assert_eq!(station.current_calls(), calls);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_when_idle_is_noop() {
        let station = Arc::new(MockStation::new());
        let (mut ctrl, _rx) = controller(station, 5000);

        ctrl.stop();
        assert!(!ctrl.is_running());
    }

    /// Data source whose live fetch always reports a superseded request.
    struct SupersededStation;

    #[async_trait::async_trait]
    impl StationDataSource for SupersededStation {
        async fn fetch_current(&self) -> crate::error::Result<Reading> {
            Err(Error::Cancelled)
        }

        async fn fetch_average(&self, _window: AverageWindow) -> Option<f64> {
            Some(0.0)
        }

        async fn fetch_history(&self, _days: u32) -> crate::error::Result<meteo_types::HistorySeries> {
            Ok(meteo_types::HistorySeries::default())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_tick_emits_nothing() {
        let station = Arc::new(SupersededStation);
        let (ctrl, mut rx) =
            RefreshController::new(station, Duration::from_secs(5), RetryConfig::none());

        ctrl.tick_now().await;

        // A superseded fetch has a fresher sibling reporting in its place,
        // so the tick produces no reading, no failure, and no averages.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_phase() {
        let station = Arc::new(MockStation::new());
        let (mut ctrl, _rx) = controller(Arc::clone(&station), 5000);

        ctrl.start();
        tokio::time::advance(Duration::from_millis(4000)).await;
        settle().await;
        assert_eq!(station.current_calls(), 0);

        // Restarting discards the 4s of elapsed phase.
        ctrl.restart();
        tokio::time::advance(Duration::from_millis(4000)).await;
        settle().await;
        assert_eq!(station.current_calls(), 0);

        tokio::time::advance(Duration::from_millis(1001)).await;
        settle().await;
        assert_eq!(station.current_calls(), 1);
    }
}
