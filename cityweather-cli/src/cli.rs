use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, ForecastRequest, WeatherTransport, client_from_config, model::FORECAST_HORIZON_DAYS,
};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::debug;

use crate::{browse, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City search and weather forecast")]
pub struct Cli {
    /// Log flow and transport activity to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key and default city.
    Configure,

    /// Show the forecast for a city.
    Forecast {
        /// City name as understood by weatherapi.com.
        city: String,

        /// Number of forecast days.
        #[arg(long, default_value_t = FORECAST_HORIZON_DAYS)]
        days: u8,
    },

    /// List locations matching a query.
    Search {
        query: String,
    },

    /// Interactive search box: type, pick a location, see its forecast.
    Browse,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        debug!(command = ?self.command, "running command");

        match self.command {
            Command::Configure => configure(),
            Command::Forecast { city, days } => {
                let client = client_from_config(&Config::load()?)?;
                match client.forecast(&ForecastRequest::new(city.as_str(), days)).await {
                    Some(forecast) => print!("{}", render::forecast(&forecast)),
                    None => println!("No forecast available for '{city}'."),
                }
                Ok(())
            }
            Command::Search { query } => {
                let client = client_from_config(&Config::load()?)?;
                match client.search(&query).await {
                    Some(candidates) => print!("{}", render::candidates(&candidates)),
                    None => println!("Search for '{query}' returned no data."),
                }
                Ok(())
            }
            Command::Browse => {
                let config = Config::load()?;
                let client = client_from_config(&config)?;
                browse::run(client, &config).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !default_city.trim().is_empty() {
        config.default_city = default_city.trim().to_string();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
