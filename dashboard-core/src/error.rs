use thiserror::Error;

/// Failure of a single forecast fetch. The display text is what the
/// dashboard shows on its error screen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("Weather data fetch failed: {0}")]
    Transport(String),

    #[error("Weather data fetch failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse forecast data: {0}")]
    Decode(String),
}

/// Failure of the raw geocoding call. GeoResolver logs and swallows these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Transport(String),

    #[error("Geocoding request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse geocoding response: {0}")]
    Decode(String),
}
