use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Text;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use weather_dashboard_core::{
    Config, DashboardController, DashboardState, GeoResolver, controller_from_config, provider,
};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard once, for CITY or the default location.
    Show {
        /// City to search for.
        city: Option<String>,
    },

    /// Show the dashboard and keep prompting for cities.
    Interactive,

    /// Look up CITY and store it as the default location.
    SetDefault {
        city: String,
    },

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let config = Config::load_from(&path)?;

        match self.command {
            Command::Show { city } => show(&config, city.as_deref()).await,
            Command::Interactive => interactive(&config).await,
            Command::SetDefault { city } => set_default(config, &path, &city).await,
            Command::ConfigPath => {
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

async fn show(config: &Config, city: Option<&str>) -> anyhow::Result<()> {
    let controller = controller_from_config(config)?;

    let matched = open_dashboard(&controller, city).await;
    if let (Some(city), false) = (city, matched) {
        eprintln!(
            "No location matched '{city}', showing {}.",
            controller.location().display_name
        );
    }

    println!("{}", render(&controller.state(), config.hourly_cards));
    Ok(())
}

/// Searches `city` first and only mounts at the current location when there
/// is no city or it did not match. Returns whether `city` matched.
async fn open_dashboard(controller: &DashboardController, city: Option<&str>) -> bool {
    let matched = match city {
        Some(city) => controller.search(city).await.is_some(),
        None => false,
    };
    if !matched {
        controller.mount().await;
    }
    matched
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let controller = controller_from_config(config)?;
    let mut updates = controller.subscribe();

    controller.mount().await;
    print_if_changed(&mut updates, config.hourly_cards);

    while let Some(city) = prompt_city().await? {
        if city.trim().is_empty() {
            break;
        }
        if controller.search(&city).await.is_none() {
            eprintln!("No location matched '{}'.", city.trim());
        }
        print_if_changed(&mut updates, config.hourly_cards);
    }

    Ok(())
}

fn print_if_changed(updates: &mut watch::Receiver<DashboardState>, hourly_cards: usize) {
    if updates.has_changed().unwrap_or(false) {
        let state = updates.borrow_and_update().clone();
        println!("\n{}\n", render(&state, hourly_cards));
    } else {
        tracing::debug!("dashboard unchanged");
    }
}

async fn prompt_city() -> anyhow::Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(|| {
        Text::new("Search City:")
            .with_help_message("Enter a city name; empty input or Esc quits")
            .prompt_skippable()
    })
    .await
    .context("Prompt task failed")?
    .context("Failed to read city")?;

    Ok(answer)
}

async fn set_default(mut config: Config, path: &Path, city: &str) -> anyhow::Result<()> {
    let (geocoder, _) = provider::providers_from_config(&config)?;
    let Some(location) = GeoResolver::new(geocoder).resolve(city).await else {
        bail!("No location matched '{city}'");
    };

    config.set_default_location(location);
    config.save_to(path)?;

    let saved = &config.default_location;
    println!(
        "Default location set to {} ({:.4}, {:.4})",
        saved.display_name, saved.latitude, saved.longitude
    );
    Ok(())
}
