//! Text rendering of the dashboard state as cards.

use chrono::NaiveDateTime;
use weather_dashboard_core::{DashboardState, ForecastSnapshot, Location, catalog};

pub fn render(state: &DashboardState, hourly_cards: usize) -> String {
    match state {
        DashboardState::Loading => "🌀 Loading Weather Data...".to_string(),
        DashboardState::Error(message) => format!("⚠️  Error: {message}"),
        DashboardState::Ready { location, snapshot } => ready(location, snapshot, hourly_cards),
    }
}

fn ready(location: &Location, snapshot: &ForecastSnapshot, hourly_cards: usize) -> String {
    let current = &snapshot.current;
    let icon = catalog::icon_for(current.condition_code);
    let mut lines = vec![
        format!("{icon} {} Weather", location.display_name),
        String::new(),
        "Current Conditions".to_string(),
        format!("  {:.1}°C  {icon} {}", current.temperature_c, catalog::describe(current.condition_code)),
        format!("  Wind: {} km/h", current.wind_speed_kmh),
        String::new(),
        "Daily Overview".to_string(),
    ];

    match snapshot.today() {
        Some(today) => {
            lines.push(detail("🔥", "Max Temperature", format!("{}°C", today.temp_max_c)));
            lines.push(detail("❄️", "Min Temperature", format!("{}°C", today.temp_min_c)));
            lines.push(detail("☀️", "UV Index", or_dash(today.uv_index_max, "")));
            lines.push(detail("🌅", "Sunrise", clock(&today.sunrise)));
            lines.push(detail("🌇", "Sunset", clock(&today.sunset)));
        }
        None => lines.push("  No daily data".to_string()),
    }

    lines.push(String::new());
    lines.push("Additional Details".to_string());
    let first_hour = snapshot.hourly.first();
    lines.push(detail("💧", "Humidity", or_dash(first_hour.and_then(|h| h.humidity_pct), "%")));
    lines.push(detail(
        "🌧️",
        "Precipitation",
        or_dash(first_hour.and_then(|h| h.precipitation_chance_pct), "%"),
    ));
    lines.push(detail("🍃", "Wind", catalog::wind_label(current.wind_speed_kmh).to_string()));

    lines.push(String::new());
    lines.push("Hourly Forecast".to_string());
    for hour in snapshot.next_hours(hourly_cards) {
        lines.push(format!(
            "  {}  {}  {:>5.1}°C  💧 {}",
            hour.time.format("%H:00"),
            catalog::icon_for(hour.condition_code),
            hour.temperature_c,
            or_dash(hour.precipitation_chance_pct, "%"),
        ));
    }

    lines.join("\n")
}

fn detail(icon: &str, label: &str, value: String) -> String {
    format!("  {icon} {label:<16} {value}")
}

fn or_dash(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}{unit}"))
}

fn clock(t: &NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}
