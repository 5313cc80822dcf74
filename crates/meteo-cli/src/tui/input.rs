//! Keyboard input handling for the TUI.
//!
//! Translates keyboard events into high-level actions and applies them to
//! the application state.
//!
//! # Key Bindings
//!
//! | Key         | Action              |
//! |-------------|---------------------|
//! | `q` / `Esc` | Quit                |
//! | `r`         | Refresh now         |
//! | `p`         | Pause/resume        |
//! | `Tab` / `l` | Switch tab          |
//! | `7`         | 7-day history       |
//! | `3`         | 30-day history      |

use crossterm::event::KeyCode;

use super::app::{App, Tab};
use super::messages::Command;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Fetch a reading immediately.
    Refresh,
    /// Toggle the refresh pause.
    TogglePause,
    /// Switch to the next tab.
    NextTab,
    /// Show the history for a day window.
    HistoryWindow(u32),
    /// No action (unrecognized key).
    None,
}

/// Map a key code to an action.
pub fn handle_key(key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('p') => Action::TogglePause,
        KeyCode::Tab | KeyCode::Char('l') => Action::NextTab,
        KeyCode::Char('7') => Action::HistoryWindow(7),
        KeyCode::Char('3') => Action::HistoryWindow(30),
        _ => Action::None,
    }
}

/// Apply an action to the app state.
///
/// Returns the command to send to the worker, if the action needs one.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::Quit => {
            app.quit();
            None
        }
        Action::Refresh => Some(Command::TickNow),
        Action::TogglePause => {
            app.paused = !app.paused;
            if app.paused {
                Some(Command::Stop)
            } else {
                // Resuming fetches immediately; Start alone would wait a
                // full period. The event loop sends Start right after.
                Some(Command::TickNow)
            }
        }
        Action::NextTab => {
            app.next_tab();
            // Entering the history tab with no data yet triggers a fetch.
            if app.active_tab == Tab::History && app.history.is_none() {
                Some(Command::FetchHistory {
                    days: app.history_days,
                })
            } else {
                None
            }
        }
        Action::HistoryWindow(days) => {
            if app.set_history_days(days) {
                Some(Command::FetchHistory { days })
            } else {
                None
            }
        }
        Action::None => None,
    }
}
