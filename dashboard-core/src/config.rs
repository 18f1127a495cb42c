use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    Location,
    provider::open_meteo::{FORECAST_URL, GEOCODING_URL},
};

/// Settings stored on disk. Every field falls back to its default when absent.
///
/// Example TOML:
/// ```toml
/// hourly_cards = 12
///
/// [default_location]
/// latitude = 48.85341
/// longitude = 2.3488
/// display_name = "Paris"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub request_timeout_secs: u64,
    /// How many hourly entries the dashboard shows.
    pub hourly_cards: usize,
    /// Where the dashboard opens before any search.
    pub default_location: Location,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            request_timeout_secs: 10,
            hourly_cards: 12,
            default_location: Location::new_york(),
        }
    }
}

impl Config {
    /// Load config, or defaults if the file doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_default_location(&mut self, location: Location) {
        self.default_location = location;
    }
}
