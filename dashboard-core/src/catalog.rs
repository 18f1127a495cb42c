//! Static lookups for WMO condition codes and wind speeds.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Shown for any code outside the known table.
pub const FALLBACK_ICON: &str = "🌈";

/// Icon glyph for a WMO condition code.
pub fn icon_for(code: i32) -> &'static str {
    match code {
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 | 53 | 55 => "🌧️",
        61 | 63 | 65 => "🌧️",
        71 | 73 | 75 | 77 => "❄️",
        80 | 81 | 82 => "🌧️",
        85 | 86 => "❄️",
        95 | 96 | 99 => "⛈️",
        _ => FALLBACK_ICON,
    }
}

/// Human-readable description for a WMO condition code.
pub fn describe(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with light hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown conditions",
    }
}

const WIND_LADDER: &[(f64, &str)] = &[
    (1.0, "Calm"),
    (5.0, "Light Breeze"),
    (11.0, "Gentle Breeze"),
    (19.0, "Moderate Breeze"),
    (28.0, "Fresh Breeze"),
    (38.0, "Strong Breeze"),
];

/// Label for a wind speed in km/h. First threshold the speed is strictly
/// below wins; NaN and anything from 38 up is "High Wind".
pub fn wind_label(speed_kmh: f64) -> &'static str {
    WIND_LADDER
        .iter()
        .find(|(limit, _)| speed_kmh < *limit)
        .map(|(_, label)| *label)
        .unwrap_or("High Wind")
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_CODES: &[i32] = &[
        0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95, 96, 99,
    ];

    #[test]
    fn clear_sky_has_sun_icon() {
        assert_eq!(icon_for(0), "☀️");
        assert_eq!(describe(0), "Clear sky");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(icon_for(999), FALLBACK_ICON);
        assert_eq!(icon_for(-1), FALLBACK_ICON);
        assert_eq!(icon_for(4), FALLBACK_ICON);
        assert_eq!(describe(999), "Unknown conditions");
    }

    #[test]
    fn every_known_code_has_its_own_entry() {
        for code in KNOWN_CODES {
            assert_ne!(icon_for(*code), FALLBACK_ICON, "code {code}");
            assert_ne!(describe(*code), "Unknown conditions", "code {code}");
        }
    }

    #[test]
    fn icon_groups() {
        assert_eq!(icon_for(45), icon_for(48));
        assert_eq!(icon_for(61), "🌧️");
        assert_eq!(icon_for(82), "🌧️");
        assert_eq!(icon_for(77), "❄️");
        assert_eq!(icon_for(86), "❄️");
        assert_eq!(icon_for(99), "⛈️");
    }

    #[test]
    fn wind_boundaries_belong_to_higher_bucket() {
        assert_eq!(wind_label(0.0), "Calm");
        assert_eq!(wind_label(0.99), "Calm");
        assert_eq!(wind_label(1.0), "Light Breeze");
        assert_eq!(wind_label(5.0), "Gentle Breeze");
        assert_eq!(wind_label(11.0), "Moderate Breeze");
        assert_eq!(wind_label(19.0), "Fresh Breeze");
        assert_eq!(wind_label(28.0), "Strong Breeze");
        assert_eq!(wind_label(38.0), "High Wind");
        assert_eq!(wind_label(120.0), "High Wind");
    }

    #[test]
    fn wind_label_outside_normal_range() {
        assert_eq!(wind_label(-3.0), "Calm");
        assert_eq!(wind_label(f64::NEG_INFINITY), "Calm");
        assert_eq!(wind_label(f64::NAN), "High Wind");
        assert_eq!(wind_label(f64::INFINITY), "High Wind");
    }

    #[test]
    fn wind_label_is_monotonic() {
        let order = [
            "Calm",
            "Light Breeze",
            "Gentle Breeze",
            "Moderate Breeze",
            "Fresh Breeze",
            "Strong Breeze",
            "High Wind",
        ];
        let rank = |label: &str| order.iter().position(|l| *l == label).expect("known label");

        let mut last = 0;
        for tenth in 0..500 {
            let current = rank(wind_label(tenth as f64 / 10.0));
            assert!(current >= last);
            last = current;
        }
    }
}
