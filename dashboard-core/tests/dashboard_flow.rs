//! End-to-end dashboard flows against a mock Open-Meteo server.

use serde_json::json;
use weather_dashboard_core::{
    Config, DashboardState, FetchOutcome, Location, catalog, controller_from_config,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        geocoding_url: server.uri(),
        forecast_url: server.uri(),
        ..Config::default()
    }
}

fn forecast_body(code: i32, windspeed: f64) -> serde_json::Value {
    json!({
        "timezone": "Europe/Paris",
        "current_weather": { "temperature": 18.5, "windspeed": windspeed, "weathercode": code },
        "hourly": {
            "time": ["2026-10-16T10:00", "2026-10-16T11:00"],
            "temperature_2m": [17.9, 18.5],
            "relativehumidity_2m": [64, 61],
            "windspeed_10m": [4.0, 5.0],
            "precipitation_probability": [0, 5],
            "weathercode": [code, code]
        },
        "daily": {
            "time": ["2026-10-16"],
            "sunrise": ["2026-10-16T08:12"],
            "sunset": ["2026-10-16T19:01"],
            "uv_index_max": [2.9],
            "temperature_2m_max": [19.4],
            "temperature_2m_min": [10.2],
            "weathercode": [code]
        }
    })
}

async fn mount_geocoding(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "name": "Paris", "latitude": 48.85341, "longitude": 2.3488 }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Qwxyzzz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.2 })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_paris_ends_ready() {
    let server = MockServer::start().await;
    mount_geocoding(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(0, 5.0)))
        .mount(&server)
        .await;

    let controller = controller_from_config(&config_for(&server)).unwrap();
    assert!(controller.state().is_loading());

    assert_eq!(controller.mount().await, FetchOutcome::Applied);
    assert_eq!(controller.search("Paris").await, Some(FetchOutcome::Applied));

    match controller.state() {
        DashboardState::Ready { location, snapshot } => {
            assert_eq!(location.display_name, "Paris");
            assert_eq!(catalog::icon_for(snapshot.current.condition_code), "☀️");
            assert_eq!(catalog::wind_label(snapshot.current.wind_speed_kmh), "Gentle Breeze");
            assert_eq!(snapshot.hourly.len(), 2);
        }
        other => panic!("expected ready state, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_city_leaves_dashboard_alone() {
    let server = MockServer::start().await;
    mount_geocoding(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(3, 12.0)))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_from_config(&config_for(&server)).unwrap();
    controller.mount().await;
    let before = controller.state();

    assert_eq!(controller.search("Qwxyzzz").await, None);
    assert_eq!(controller.state(), before);
    assert_eq!(controller.location(), Location::new_york());
}

#[tokio::test]
async fn server_error_shows_error_state() {
    let server = MockServer::start().await;
    mount_geocoding(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .expect(2)
        .mount(&server)
        .await;

    let controller = controller_from_config(&config_for(&server)).unwrap();
    let mut updates = controller.subscribe();

    controller.mount().await;
    controller.search("Paris").await;

    match controller.state() {
        DashboardState::Error(message) => assert!(message.contains("500")),
        other => panic!("expected error state, got {other:?}"),
    }
    assert!(!updates.borrow_and_update().is_ready());
}

#[tokio::test]
async fn unreachable_geocoder_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(61, 40.0)))
        .mount(&server)
        .await;

    let config = Config { geocoding_url: "http://127.0.0.1:9".into(), ..config_for(&server) };
    let controller = controller_from_config(&config).unwrap();
    controller.mount().await;

    assert_eq!(controller.search("Paris").await, None);
    assert_eq!(controller.location().display_name, "New York City");
    assert!(controller.state().is_ready());
}
