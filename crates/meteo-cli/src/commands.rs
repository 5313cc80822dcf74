//! One-shot command implementations.
//!
//! Each command builds a [`StationClient`] from the loaded config, performs
//! a single fetch, prints, and exits. The TUI dashboard lives in
//! [`crate::tui`] instead.

use anyhow::{Result, bail};

use meteo_client::StationClient;
use meteo_types::AverageWindow;

use crate::config::Config;
use crate::format::{format_average, format_humidity, format_temp};

fn client(config: &Config) -> Result<StationClient> {
    Ok(StationClient::new(&config.base_url, config.timeout())?)
}

/// Print the current reading.
pub async fn read(config: &Config, format: &str) -> Result<()> {
    let client = client(config)?;
    let reading = client.fetch_current().await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        "text" => {
            println!(
                "Temperature: {}",
                format_temp(reading.temperature, &config.placeholder)
            );
            println!(
                "Humidity:    {}",
                format_humidity(reading.humidity, &config.placeholder)
            );
        }
        other => bail!("unknown format: {} (expected text or json)", other),
    }

    Ok(())
}

/// Print a rolling temperature average.
pub async fn average(config: &Config, days: u16) -> Result<()> {
    let window = match days {
        7 => AverageWindow::Seven,
        30 => AverageWindow::Thirty,
        other => bail!("unsupported averaging window: {} days (expected 7 or 30)", other),
    };

    let client = client(config)?;
    let value = client.fetch_average(window).await;
    println!(
        "{} average: {}",
        window,
        format_average(value, &config.placeholder)
    );

    Ok(())
}

/// Print the temperature history.
pub async fn history(config: &Config, days: u32, format: &str) -> Result<()> {
    let client = client(config)?;
    let series = client.fetch_history(days).await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        "text" => {
            if series.is_empty() {
                println!("No history for the last {} days", days);
                return Ok(());
            }
            for point in &series.points {
                println!(
                    "{}  {}",
                    point.label,
                    format_temp(Some(point.temperature), &config.placeholder)
                );
            }
        }
        other => bail!("unknown format: {} (expected text or json)", other),
    }

    Ok(())
}
