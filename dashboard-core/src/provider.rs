use crate::{
    Config, ForecastError, ForecastSnapshot, GeocodeError, Location,
    provider::open_meteo::OpenMeteoClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

/// Resolves a place name to its best match. `Ok(None)` means the service
/// answered but found nothing.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<Option<Location>, GeocodeError>;
}

/// Fetches a forecast for a coordinate. One attempt per call, no retry.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, location: &Location) -> Result<ForecastSnapshot, ForecastError>;
}

/// Both ports backed by one Open-Meteo client.
pub fn providers_from_config(
    config: &Config,
) -> anyhow::Result<(Arc<dyn Geocoder>, Arc<dyn ForecastProvider>)> {
    let client = Arc::new(OpenMeteoClient::from_config(config)?);
    let geocoder: Arc<dyn Geocoder> = client.clone();
    let forecasts: Arc<dyn ForecastProvider> = client;
    Ok((geocoder, forecasts))
}
