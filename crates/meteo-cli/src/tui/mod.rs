//! Main entry point for the TUI dashboard.
//!
//! This module ties together all the TUI components and provides the main
//! event loop for the terminal user interface. It handles:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Focus-driven pause/resume of the refresh cycle
//! - Graceful shutdown coordination

pub mod app;
pub mod input;
pub mod messages;
pub mod ui;
pub mod worker;

pub use app::App;
pub use messages::{Command, StationEvent};
pub use worker::StationWorker;

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use meteo_client::StationClient;

use crate::config::Config;

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode, focus-change events, and switches to the alternate
/// screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    stdout().execute(DisableFocusChange)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application.
///
/// This is the main entry point for the dashboard. It:
/// 1. Builds the HTTP client from config
/// 2. Creates communication channels between UI and worker
/// 3. Spawns the background station worker
/// 4. Kicks off an immediate fetch plus the periodic cycle
/// 5. Runs the main event loop
/// 6. Ensures graceful shutdown
pub async fn run(config: &Config) -> Result<()> {
    let station = Arc::new(StationClient::new(&config.base_url, config.timeout())?);
    info!(base_url = %config.base_url, "starting dashboard");

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<StationEvent>(32);

    let worker = StationWorker::new(
        cmd_rx,
        event_tx,
        station,
        config.refresh_interval(),
        config.retry_config(),
    );
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(config);
    let mut terminal = setup_terminal()?;

    // First fetch now, then the periodic cycle; the interval's first tick
    // lands one full period in, so this does not double-fetch.
    let _ = cmd_tx.try_send(Command::TickNow);
    let _ = cmd_tx.try_send(Command::Start);
    let _ = cmd_tx.try_send(Command::FetchHistory {
        days: config.history_days,
    });

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx, event_rx).await;

    let _ = cmd_tx.try_send(Command::Shutdown);
    restore_terminal()?;
    let _ = worker_handle.await;

    result
}

/// Main event loop for the TUI.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
    mut event_rx: mpsc::Receiver<StationEvent>,
) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for keyboard and focus events with timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        let action = input::handle_key(key.code);
                        if let Some(cmd) = input::apply_action(app, action) {
                            // Resuming needs both an immediate fetch and a
                            // fresh cadence.
                            let follow_start = cmd == Command::TickNow
                                && !app.paused
                                && action == input::Action::TogglePause;
                            let _ = command_tx.try_send(cmd);
                            if follow_start {
                                let _ = command_tx.try_send(Command::Start);
                            }
                        }
                    }
                }
                Event::FocusLost => {
                    if !app.paused {
                        app.paused = true;
                        let _ = command_tx.try_send(Command::Stop);
                    }
                }
                Event::FocusGained => {
                    if app.paused {
                        app.paused = false;
                        let _ = command_tx.try_send(Command::TickNow);
                        let _ = command_tx.try_send(Command::Start);
                    }
                }
                _ => {}
            }
        }

        // Non-blocking receive of station events
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }
    }

    Ok(())
}
