use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    Config,
    error::{ForecastError, GeocodeError},
    model::{CurrentConditions, DailyPoint, ForecastSnapshot, HourlyPoint, Location},
};

use super::{ForecastProvider, Geocoder};

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const FORECAST_URL: &str = "https://api.open-meteo.com";

const HOURLY_VARS: &str =
    "temperature_2m,relativehumidity_2m,windspeed_10m,precipitation_probability,weathercode";
const DAILY_VARS: &str =
    "sunrise,sunset,uv_index_max,temperature_2m_max,temperature_2m_min,weathercode";

// Open-Meteo local timestamps carry no seconds or offset.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            geocoding_url: trim_base(geocoding_url.into()),
            forecast_url: trim_base(forecast_url.into()),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            geocoding_url: trim_base(config.geocoding_url.clone()),
            forecast_url: trim_base(config.forecast_url.clone()),
            http,
        })
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn search(&self, query: &str) -> Result<Option<Location>, GeocodeError> {
        let url = format!("{}/v1/search", self.geocoding_url);

        let res = self
            .http
            .get(&url)
            .query(&[("name", query), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| GeocodeError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OmSearchResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Decode(e.to_string()))?;

        let hit = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|r| Location::new(r.latitude, r.longitude, r.name));

        tracing::debug!(query, found = hit.is_some(), "geocoding search finished");
        Ok(hit)
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch(&self, location: &Location) -> Result<ForecastSnapshot, ForecastError> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_VARS),
                ("daily", DAILY_VARS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| ForecastError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| ForecastError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OmForecastResponse =
            serde_json::from_str(&body).map_err(|e| ForecastError::Decode(e.to_string()))?;

        let snapshot = parsed.into_snapshot()?;
        tracing::debug!(
            place = %location.display_name,
            hours = snapshot.hourly.len(),
            days = snapshot.daily.len(),
            "forecast fetched"
        );
        Ok(snapshot)
    }
}

#[derive(Debug, Deserialize)]
struct OmSearchResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    results: Option<Vec<OmSearchResult>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    relativehumidity_2m: Vec<Option<f64>>,
    windspeed_10m: Vec<f64>,
    precipitation_probability: Vec<Option<f64>>,
    weathercode: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    sunrise: Vec<String>,
    sunset: Vec<String>,
    uv_index_max: Vec<Option<f64>>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weathercode: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    timezone: String,
    current_weather: OmCurrentWeather,
    hourly: OmHourly,
    daily: OmDaily,
}

impl OmForecastResponse {
    fn into_snapshot(self) -> Result<ForecastSnapshot, ForecastError> {
        let h = self.hourly;
        let len = h.time.len();
        ensure_len("hourly", "temperature_2m", len, h.temperature_2m.len())?;
        ensure_len("hourly", "relativehumidity_2m", len, h.relativehumidity_2m.len())?;
        ensure_len("hourly", "windspeed_10m", len, h.windspeed_10m.len())?;
        ensure_len("hourly", "precipitation_probability", len, h.precipitation_probability.len())?;
        ensure_len("hourly", "weathercode", len, h.weathercode.len())?;

        let hourly = (0..len)
            .map(|i| {
                Ok(HourlyPoint {
                    time: parse_time(&h.time[i])?,
                    temperature_c: h.temperature_2m[i],
                    humidity_pct: h.relativehumidity_2m[i],
                    wind_speed_kmh: h.windspeed_10m[i],
                    precipitation_chance_pct: h.precipitation_probability[i],
                    condition_code: h.weathercode[i],
                })
            })
            .collect::<Result<Vec<_>, ForecastError>>()?;

        let d = self.daily;
        let len = d.sunrise.len();
        ensure_len("daily", "sunset", len, d.sunset.len())?;
        ensure_len("daily", "uv_index_max", len, d.uv_index_max.len())?;
        ensure_len("daily", "temperature_2m_max", len, d.temperature_2m_max.len())?;
        ensure_len("daily", "temperature_2m_min", len, d.temperature_2m_min.len())?;
        ensure_len("daily", "weathercode", len, d.weathercode.len())?;

        let daily = (0..len)
            .map(|i| {
                Ok(DailyPoint {
                    sunrise: parse_time(&d.sunrise[i])?,
                    sunset: parse_time(&d.sunset[i])?,
                    uv_index_max: d.uv_index_max[i],
                    temp_max_c: d.temperature_2m_max[i],
                    temp_min_c: d.temperature_2m_min[i],
                    condition_code: d.weathercode[i],
                })
            })
            .collect::<Result<Vec<_>, ForecastError>>()?;

        Ok(ForecastSnapshot {
            timezone: self.timezone,
            current: CurrentConditions {
                temperature_c: self.current_weather.temperature,
                wind_speed_kmh: self.current_weather.windspeed,
                condition_code: self.current_weather.weathercode,
            },
            hourly,
            daily,
        })
    }
}

fn ensure_len(group: &str, field: &str, expected: usize, actual: usize) -> Result<(), ForecastError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ForecastError::Decode(format!(
            "{group}.{field} has {actual} entries, expected {expected}"
        )))
    }
}

fn parse_time(raw: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| ForecastError::Decode(format!("invalid timestamp '{raw}': {e}")))
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
