use chrono::{Local, TimeZone};
use forecast_core::{
    FetchError, OpenWeatherProvider, Query, Units, WeatherProvider, format::clock_12h,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

fn local_noon() -> i64 {
    Local
        .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("noon is never ambiguous")
        .timestamp()
}

fn london_payload() -> Value {
    json!({
        "name": "London",
        "sys": {
            "country": "GB",
            "sunrise": local_noon(),
            "sunset": local_noon() + 8 * 3600
        },
        "main": {
            "temp": 15.5,
            "feels_like": 14.9,
            "temp_min": 13.0,
            "temp_max": 17.2,
            "humidity": 72
        },
        "visibility": 3000,
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds" }],
        "wind": { "speed": 4.1, "deg": 240 },
        "clouds": { "all": 75 },
        "cod": 200
    })
}

fn london() -> Query {
    Query::new("London", Units::Metric)
}

fn provider_for(server: &MockServer, api_key: Option<&str>) -> OpenWeatherProvider {
    let base_url = format!("{}/data/2.5/weather", server.uri());
    OpenWeatherProvider::new(api_key.map(str::to_string), base_url)
        .expect("client builds")
}

#[tokio::test]
async fn success_maps_payload_into_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("TEST_KEY"));
    let report = provider
        .fetch(&london())
        .await
        .expect("200 should produce a report");

    assert_eq!(report.city, "London");
    assert_eq!(report.country, "GB");
    assert_eq!(report.temperature, 15.5);
    assert_eq!(report.feels_like, 14.9);
    assert_eq!(report.temp_min, 13.0);
    assert_eq!(report.temp_max, 17.2);
    assert_eq!(report.humidity_pct, 72);
    assert_eq!(report.visibility_km, 3.0);
    assert_eq!(report.description, "broken clouds");
    assert_eq!(report.wind_speed, 4.1);
    assert_eq!(report.cloud_pct, 75);
    assert_eq!(clock_12h(report.sunrise), "12:00 PM");
    assert_eq!(clock_12h(report.sunset), "08:00 PM");
    assert_eq!(report.units, Units::Metric);
}

#[tokio::test]
async fn imperial_units_are_requested_and_recorded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let report = provider_for(&server, Some("TEST_KEY"))
        .fetch(&Query::new("London", Units::Imperial))
        .await
        .expect("200 should produce a report");

    assert_eq!(report.units, Units::Imperial);
}

#[tokio::test]
async fn missing_api_key_omits_appid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("appid"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = provider_for(&server, None).fetch(&london()).await;

    assert_eq!(outcome, Err(FetchError::Api(401)));
}

#[tokio::test]
async fn not_found_ignores_body() {
    let server = MockServer::start().await;
    let html = ResponseTemplate::new(404).set_body_string("<html>not json");

    Mock::given(method("GET"))
        .respond_with(html)
        .expect(1)
        .mount(&server)
        .await;

    let atlantis = Query::new("Atlantis", Units::Metric);
    let outcome = provider_for(&server, Some("KEY")).fetch(&atlantis).await;

    assert_eq!(outcome, Err(FetchError::NotFound));
}

#[tokio::test]
async fn server_error_carries_status_code() {
    let server = MockServer::start().await;
    let failure = ResponseTemplate::new(500).set_body_string("boom");

    Mock::given(method("GET"))
        .respond_with(failure)
        .expect(1)
        .mount(&server)
        .await;

    let outcome = provider_for(&server, Some("KEY")).fetch(&london()).await;

    assert_eq!(outcome, Err(FetchError::Api(500)));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr")
    };

    let base_url = format!("http://{addr}/weather");
    let provider = OpenWeatherProvider::new(Some("SECRET_KEY".into()), base_url)
        .expect("client builds");

    match provider.fetch(&london()).await {
        Err(FetchError::Transport(msg)) => {
            assert!(!msg.is_empty());
            assert!(!msg.contains("SECRET_KEY"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_base_url_is_transport_error() {
    let provider = OpenWeatherProvider::new(None, String::new()).unwrap();

    let outcome = provider.fetch(&london()).await;

    assert!(matches!(outcome, Err(FetchError::Transport(msg)) if !msg.is_empty()));
}

#[tokio::test]
async fn malformed_success_body_is_transport_error() {
    let server = MockServer::start().await;
    let body = json!({ "name": "London" });
    let partial = ResponseTemplate::new(200).set_body_json(body);

    Mock::given(method("GET"))
        .respond_with(partial)
        .expect(1)
        .mount(&server)
        .await;

    let outcome = provider_for(&server, Some("KEY")).fetch(&london()).await;

    match outcome {
        Err(FetchError::Transport(msg)) => assert!(msg.starts_with("invalid response body")),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn repeated_fetches_yield_equal_reports() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
        .expect(2)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("TEST_KEY"));

    let first = provider.fetch(&london()).await.expect("first fetch");
    let second = provider.fetch(&london()).await.expect("second fetch");

    assert_eq!(first, second);
}
