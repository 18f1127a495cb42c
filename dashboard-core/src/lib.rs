//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Shared domain models (locations, forecast snapshots)
//! - The condition catalog (icons, descriptions, wind labels)
//! - Geocoding and forecast ports with an Open-Meteo implementation
//! - The dashboard controller state machine
//! - Configuration handling
//!
//! It is used by `weather-dashboard-cli`, but any front end can drive the
//! controller and observe its state.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod geo;
pub mod model;
pub mod provider;

pub use config::Config;
pub use controller::{DashboardController, DashboardState, FetchOutcome};
pub use error::{ForecastError, GeocodeError};
pub use geo::GeoResolver;
pub use model::{CurrentConditions, DailyPoint, ForecastSnapshot, HourlyPoint, Location};
pub use provider::{ForecastProvider, Geocoder, open_meteo::OpenMeteoClient};

/// Wire up a controller against the providers named in `config`.
pub fn controller_from_config(config: &Config) -> anyhow::Result<DashboardController> {
    let (geocoder, forecasts) = provider::providers_from_config(config)?;
    Ok(DashboardController::new(
        GeoResolver::new(geocoder),
        forecasts,
        config.default_location.clone(),
    ))
}
