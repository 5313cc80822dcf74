//! Terminal dashboard and CLI for the meteo weather station.
//!
//! This crate provides the `meteo` binary: a live terminal dashboard plus
//! one-shot commands against the station's REST API.
//!
//! # Features
//!
//! - **Dashboard**: live temperature/humidity cards, rolling averages, and
//!   a history chart, recolored by temperature band
//! - **One-shot commands**: current reading, averages, and history in text
//!   or JSON
//! - **Configuration file**: persistent settings for endpoint, refresh
//!   cadence, and band thresholds
//! - **Shell completions**: bash, zsh, fish, and PowerShell
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dashboard` | Interactive terminal dashboard (default) |
//! | `read` | Print the current reading |
//! | `average` | Print a 7 or 30 day rolling average |
//! | `history` | Print the temperature history |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Settings live in `~/.config/meteo/config.toml` (or platform equivalent);
//! see [`config::Config`] for the available fields.

pub mod commands;
pub mod config;
pub mod format;
pub mod tui;
