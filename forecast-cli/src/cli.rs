use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, FileConfig, Query, Units, config::DEFAULT_BASE_URL, format, provider_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};

use crate::{
    controller::{App, INPUT_ERROR_MESSAGE, INPUT_ERROR_TITLE, error_dialog, validate_city},
    terminal::TerminalSurface,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather Forecast App")]
pub struct Cli {
    /// Unit system: "metric" or "imperial". Overrides config and UNITS.
    #[arg(long, global = true)]
    pub units: Option<Units>,

    /// Weather endpoint. Overrides config and BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive lookup loop (the default).
    App,

    /// Show the weather for one city and exit.
    Show {
        /// City name, e.g. "London" or "London,GB".
        city: String,
    },

    /// Store API key, endpoint and units in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { ref city }) => {
                let config = self.config()?;
                show(&config, city).await
            }
            Some(Command::App) | None => {
                let config = self.config()?;
                interactive(&config).await
            }
        }
    }

    /// Effective config with command-line overrides applied last.
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load()?;

        if let Some(units) = self.units {
            config.units = units;
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    if !config.has_api_key() {
        eprintln!("No API key configured. Hint: run `forecast configure` or set API_KEY.");
    }

    let provider = provider_from_config(config)?;
    let surface = TerminalSurface::new();
    surface.print_banner();

    App::new(provider, config.units, surface).run().await;
    Ok(())
}

async fn show(config: &Config, city: &str) -> anyhow::Result<()> {
    let city = validate_city(city)
        .ok_or_else(|| anyhow!("{INPUT_ERROR_TITLE}: {INPUT_ERROR_MESSAGE}"))?;

    let provider = provider_from_config(config)?;
    let report = provider
        .fetch(&Query::new(city, config.units))
        .await
        .map_err(|err| {
            let (title, message) = error_dialog(&err);
            anyhow!("{title}: {message}")
        })?;

    println!("{}", format::headline(&report));
    println!("{}", format::details(&report));
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let existing = FileConfig::load()?;

    let api_key = Password::new("OpenWeatherMap API key (leave empty to keep current):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let current_url = existing
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Text::new("Weather endpoint:")
        .with_default(&current_url)
        .prompt()
        .context("Failed to read endpoint")?;

    let current_units = existing.units.unwrap_or_default();
    let start = Units::all()
        .iter()
        .position(|u| *u == current_units)
        .unwrap_or(0);
    let units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    let api_key = api_key.trim();
    let updated = FileConfig {
        api_key: if api_key.is_empty() {
            existing.api_key
        } else {
            Some(api_key.to_string())
        },
        base_url: Some(base_url.trim().to_string()),
        units: Some(units),
    };

    let path = updated.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
