use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use meteo_cli::config::Config;
use meteo_cli::{commands, tui};

#[derive(Parser)]
#[command(name = "meteo")]
#[command(author, version, about = "Terminal dashboard for the meteo weather station", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use an alternate config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive dashboard (default)
    Dashboard,

    /// Print the current reading
    Read {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print a rolling temperature average
    Average {
        /// Averaging window in days (7 or 30)
        #[arg(short, long, default_value = "7")]
        days: u16,
    },

    /// Print the temperature history
    History {
        /// Window in days
        #[arg(short, long, default_value = "7")]
        days: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "meteo", &mut io::stdout());
        return Ok(());
    }

    // Initialize tracing
    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.validate().context("invalid configuration")?;

    match cli.command {
        None | Some(Commands::Dashboard) => {
            tui::run(&config).await?;
        }
        Some(Commands::Read { format }) => {
            commands::read(&config, &format).await?;
        }
        Some(Commands::Average { days }) => {
            commands::average(&config, days).await?;
        }
        Some(Commands::History { days, format }) => {
            commands::history(&config, days, &format).await?;
        }
        Some(Commands::Completions { .. }) => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
