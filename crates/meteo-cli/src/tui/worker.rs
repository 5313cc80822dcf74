//! Background worker for station fetches.
//!
//! This module contains the [`StationWorker`] which performs all network
//! operations in a background task, keeping the render loop responsive. The
//! worker communicates with the UI over channels:
//!
//! - Receives [`Command`]s from the UI to control the refresh lifecycle
//! - Sends [`StationEvent`]s back to report readings and failures
//!
//! # Architecture
//!
//! The worker runs in its own Tokio task and uses `tokio::select!` to handle
//! incoming commands and outcomes from the [`RefreshController`] at the same
//! time. History fetches run inline; they are rare and user-initiated.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use meteo_client::controller::{RefreshController, TickOutcome};
use meteo_client::{RetryConfig, StationDataSource};

use super::messages::{Command, StationEvent};

/// Background worker that drives the refresh controller.
///
/// Generic over the data source so the whole command/event protocol can be
/// tested against a mock station with the tokio clock paused.
pub struct StationWorker<S> {
    /// Receiver for commands from the UI loop.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for events back to the UI loop.
    event_tx: mpsc::Sender<StationEvent>,
    /// The shared data source, used directly for history fetches.
    station: Arc<S>,
    /// Refresh engine for the periodic live/averages cycle.
    controller: RefreshController<S>,
    /// Outcome stream from the controller.
    outcome_rx: mpsc::Receiver<TickOutcome>,
}

impl<S: StationDataSource + 'static> StationWorker<S> {
    /// Create a new worker around a data source.
    pub fn new(
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<StationEvent>,
        station: Arc<S>,
        period: std::time::Duration,
        retry: RetryConfig,
    ) -> Self {
        let (controller, outcome_rx) = RefreshController::new(Arc::clone(&station), period, retry);
        Self {
            command_rx,
            event_tx,
            station,
            controller,
            outcome_rx,
        }
    }

    /// Run the worker's main loop.
    ///
    /// Consumes the worker and runs until a [`Command::Shutdown`] is received
    /// or the command channel is closed.
    pub async fn run(mut self) {
        info!("StationWorker started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Shutdown) => {
                            info!("StationWorker received shutdown command");
                            break;
                        }
                        Some(cmd) => {
                            self.handle_command(cmd).await;
                        }
                        None => {
                            info!("Command channel closed, shutting down worker");
                            break;
                        }
                    }
                }
                outcome = self.outcome_rx.recv() => {
                    // The controller holds the sender, so this stays open for
                    // the worker's whole life.
                    if let Some(outcome) = outcome {
                        self.forward_outcome(outcome).await;
                    }
                }
            }
        }

        info!("StationWorker stopped");
    }

    /// Handle a single command from the UI.
    async fn handle_command(&mut self, cmd: Command) {
        debug!(?cmd, "Handling command");

        match cmd {
            Command::Start => self.controller.start(),
            Command::Stop => self.controller.stop(),
            Command::Restart => self.controller.restart(),
            Command::TickNow => self.controller.tick_now().await,
            Command::FetchHistory { days } => self.handle_fetch_history(days).await,
            Command::Shutdown => unreachable!("handled in run loop"),
        }
    }

    async fn handle_fetch_history(&self, days: u32) {
        match self.station.fetch_history(days).await {
            Ok(series) => {
                let _ = self
                    .event_tx
                    .send(StationEvent::History { days, series })
                    .await;
            }
            Err(e) => {
                warn!(days, error = %e, "history fetch failed");
                let _ = self
                    .event_tx
                    .send(StationEvent::HistoryFailed(e.to_string()))
                    .await;
            }
        }
    }

    /// Map a controller outcome onto the UI event vocabulary.
    async fn forward_outcome(&self, outcome: TickOutcome) {
        let event = match outcome {
            TickOutcome::Reading(reading) => StationEvent::Reading(reading),
            TickOutcome::Averages { avg7, avg30 } => StationEvent::Averages { avg7, avg30 },
            TickOutcome::Failed(message) => StationEvent::FetchFailed(message),
        };
        let _ = self.event_tx.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use meteo_client::MockStation;
    use meteo_types::Reading;

    fn spawn_worker(
        station: Arc<MockStation>,
    ) -> (mpsc::Sender<Command>, mpsc::Receiver<StationEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (event_tx, event_rx) = mpsc::channel(32);
        let worker = StationWorker::new(
            cmd_rx,
            event_tx,
            station,
            Duration::from_secs(5),
            RetryConfig::none(),
        );
        tokio::spawn(worker.run());
        (cmd_tx, event_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_now_round_trip() {
        let station = Arc::new(MockStation::new());
        station.set_reading(Reading::new(19.2, 61.0)).await;
        let (cmd_tx, mut event_rx) = spawn_worker(Arc::clone(&station));

        cmd_tx.send(Command::TickNow).await.unwrap();

        match event_rx.recv().await.unwrap() {
            StationEvent::Reading(reading) => assert_eq!(reading.temperature, Some(19.2)),
            other => panic!("expected reading, got {other:?}"),
        }
        assert!(matches!(
            event_rx.recv().await.unwrap(),
            StationEvent::Averages { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_round_trip() {
        let station = Arc::new(MockStation::new());
        station.fail_with_status(500);
        let (cmd_tx, mut event_rx) = spawn_worker(station);

        cmd_tx.send(Command::TickNow).await.unwrap();

        assert!(matches!(
            event_rx.recv().await.unwrap(),
            StationEvent::FetchFailed(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_fetch() {
        let station = Arc::new(MockStation::new());
        let (cmd_tx, mut event_rx) = spawn_worker(station);

        cmd_tx.send(Command::FetchHistory { days: 7 }).await.unwrap();

        match event_rx.recv().await.unwrap() {
            StationEvent::History { days, series } => {
                assert_eq!(days, 7);
                assert_eq!(series.len(), 3);
            }
            other => panic!("expected history, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_then_periodic_reading() {
        let station = Arc::new(MockStation::new());
        let (cmd_tx, mut event_rx) = spawn_worker(station);

        cmd_tx.send(Command::Start).await.unwrap();

        // The paused clock auto-advances to the first interval tick.
        assert!(matches!(
            event_rx.recv().await.unwrap(),
            StationEvent::Reading(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_worker() {
        let station = Arc::new(MockStation::new());
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (event_tx, _event_rx) = mpsc::channel(32);
        let worker = StationWorker::new(
            cmd_rx,
            event_tx,
            station,
            Duration::from_secs(5),
            RetryConfig::none(),
        );
        let handle = tokio::spawn(worker.run());

        cmd_tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
    }
}
