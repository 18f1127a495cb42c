use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A resolved place. Replaced wholesale on every successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Self {
        Self { latitude, longitude, display_name: display_name.into() }
    }

    /// Starting point before the user has searched for anything.
    pub fn new_york() -> Self {
        Self::new(40.7128, -74.0060, "New York City")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub condition_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub humidity_pct: Option<f64>,
    pub wind_speed_kmh: f64,
    pub precipitation_chance_pct: Option<f64>,
    pub condition_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
    pub uv_index_max: Option<f64>,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub condition_code: i32,
}

/// One fetched forecast. Timestamps are local to `timezone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub timezone: String,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
}

impl ForecastSnapshot {
    pub fn today(&self) -> Option<&DailyPoint> {
        self.daily.first()
    }

    pub fn next_hours(&self, count: usize) -> &[HourlyPoint] {
        &self.hourly[..count.min(self.hourly.len())]
    }
}
