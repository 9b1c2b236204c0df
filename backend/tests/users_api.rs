//! End-to-end behaviour of the users API in mock mode.
//!
//! Real services run over the in-memory store with OpenWeather adapters that
//! have no API key, so geolocation and weather come from the deterministic
//! mock generators.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use reqwest::Url;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use geodir_backend::Trace;
use geodir_backend::domain::ports::NoOpGeoLocationCache;
use geodir_backend::domain::{
    GeoLocationService, TRACE_ID_HEADER, TokioSleeper, UserService, WeatherBatchConfig,
    WeatherService, sample_users,
};
use geodir_backend::inbound::http::health::HealthState;
use geodir_backend::inbound::http::state::{HttpState, HttpStatePorts};
use geodir_backend::inbound::http::{configure, route_not_found};
use geodir_backend::outbound::openweather::{
    OpenWeatherEndpoint, OpenWeatherGeoLocationSource, OpenWeatherWeatherSource,
};
use geodir_backend::outbound::persistence::InMemoryUserRepository;

/// Clock that advances one second per reading.
struct TickingClock {
    seconds: AtomicI64,
}

impl TickingClock {
    fn new() -> Self {
        Self {
            seconds: AtomicI64::new(1_736_928_000),
        }
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let seconds = self.seconds.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(seconds, 0).single().expect("valid timestamp")
    }
}

#[fixture]
fn state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(TickingClock::new());
    let endpoint = OpenWeatherEndpoint::new(
        Url::parse("http://127.0.0.1:9/weather").expect("url"),
        None,
        Duration::from_secs(1),
    )
    .expect("endpoint");

    let geolocation = Arc::new(GeoLocationService::new(
        Arc::new(OpenWeatherGeoLocationSource::new(endpoint.clone())),
        Arc::new(NoOpGeoLocationCache),
    ));
    let repo = Arc::new(InMemoryUserRepository::with_users(
        sample_users(Utc::now()).expect("sample users"),
    ));
    let users = Arc::new(UserService::new(repo, geolocation.clone(), clock.clone()));
    let weather = Arc::new(WeatherService::new(
        Arc::new(OpenWeatherWeatherSource::new(endpoint)),
        clock,
        Arc::new(TokioSleeper),
        WeatherBatchConfig {
            batch_size: 5,
            batch_delay: Duration::ZERO,
        },
    ));

    HttpState::new(HttpStatePorts {
        users: users.clone(),
        users_command: users,
        geolocation,
        weather,
    })
}

fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(route_not_found))
}

macro_rules! call {
    ($service:expr, $request:expr) => {{
        let response = test::call_service(&$service, $request.to_request()).await;
        let status = response.status();
        let body: Value = test::read_body_json(response).await;
        (status, body)
    }};
}

fn create(name: &str, zip_code: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({"name": name, "zipCode": zip_code}))
}

fn id_of(body: &Value) -> String {
    body["data"]["id"].as_str().expect("user id").to_owned()
}

fn assert_near(body: &Value, latitude: f64, longitude: f64, half_spread: f64) {
    let lat = body["latitude"].as_f64().expect("latitude");
    let lon = body["longitude"].as_f64().expect("longitude");
    assert!((lat - latitude).abs() <= half_spread, "latitude {lat} out of region");
    assert!((lon - longitude).abs() <= half_spread, "longitude {lon} out of region");
}

#[rstest]
#[case("10001")]
#[case("10001-1234")]
#[actix_web::test]
async fn mock_geolocation_stays_in_region(state: HttpState, #[case] zip_code: &str) {
    let service = test::init_service(app(state)).await;

    let (status, body) = call!(service, create("Ada Lovelace", zip_code));

    assert_eq!(status, StatusCode::CREATED);
    assert_near(&body["data"], 40.7128, -74.006, 4.0);
    assert_eq!(body["data"]["timezone"], "America/New_York");
}

#[rstest]
#[actix_web::test]
async fn created_user_reads_back_identically(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let (_, created) = call!(service, create("Grace Hopper", "20500"));
    let id = id_of(&created);
    let (status, fetched) = call!(
        service,
        test::TestRequest::get().uri(&format!("/api/users/{id}"))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);
}

#[rstest]
#[actix_web::test]
async fn renaming_keeps_location(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let (_, created) = call!(service, create("Alan Turing", "10001"));
    let id = id_of(&created);
    let (status, updated) = call!(
        service,
        test::TestRequest::put()
            .uri(&format!("/api/users/{id}"))
            .set_json(json!({"name": "Alan M Turing"}))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["name"], "Alan M Turing");
    for field in ["latitude", "longitude", "timezone", "zipCode"] {
        assert_eq!(updated["data"][field], created["data"][field], "{field} changed");
    }
}

#[rstest]
#[actix_web::test]
async fn moving_zip_code_relocates_user(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let (_, created) = call!(service, create("Katherine Johnson", "10001"));
    let id = id_of(&created);
    let (status, updated) = call!(
        service,
        test::TestRequest::put()
            .uri(&format!("/api/users/{id}"))
            .set_json(json!({"zipCode": "90210"}))
    );

    assert_eq!(status, StatusCode::OK);
    let moved = &updated["data"];
    assert_eq!(moved["zipCode"], "90210");
    assert_eq!(moved["timezone"], "America/Los_Angeles");
    assert_near(moved, 37.7749, -122.4194, 4.0);
    assert_ne!(moved["latitude"], created["data"]["latitude"]);

    let created_at: DateTime<Utc> =
        serde_json::from_value(moved["createdAt"].clone()).expect("createdAt");
    let updated_at: DateTime<Utc> =
        serde_json::from_value(moved["updatedAt"].clone()).expect("updatedAt");
    assert!(updated_at > created_at);
}

#[rstest]
#[actix_web::test]
async fn deleting_missing_user_is_not_found(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let (_, created) = call!(service, create("Hedy Lamarr", "10001"));
    let uri = format!("/api/users/{}", id_of(&created));
    let (first, _) = call!(service, test::TestRequest::delete().uri(&uri));
    let (second, body) = call!(service, test::TestRequest::delete().uri(&uri));

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, _) = call!(service, test::TestRequest::get().uri(&uri));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!({"name": "A", "zipCode": "10001"}), "name")]
#[case(json!({"name": "Ada Lovelace", "zipCode": "abc"}), "zipCode")]
#[actix_web::test]
async fn invalid_bodies_name_the_field(
    state: HttpState,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let service = test::init_service(app(state)).await;

    let (status, body) = call!(
        service,
        test::TestRequest::post().uri("/api/users").set_json(payload)
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["data"][0]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn list_includes_sample_users_with_weather(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let (status, body) = call!(
        service,
        test::TestRequest::get().uri("/api/users?includeWeather=true")
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found 2 users");
    let users = body["data"].as_array().expect("users");
    for user in users {
        let weather = &user["weather"];
        let temp = weather["temp"].as_f64().expect("temp");
        assert!((45.0..95.0).contains(&temp));
        assert!(weather["description"].is_string());
    }
}

#[rstest]
#[actix_web::test]
async fn near_search_finds_sample_user(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let (status, body) = call!(
        service,
        test::TestRequest::get().uri("/api/users/near?latitude=40.75&longitude=-73.99&radiusKm=10")
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found 1 users");
    assert_eq!(body["data"][0]["name"], "John Doe");
}

#[rstest]
#[actix_web::test]
async fn responses_carry_trace_id(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let response = test::call_service(
        &service,
        test::TestRequest::get().uri("/api/users/unknown").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn geolocation_lookup_uses_mock_data(state: HttpState) {
    let service = test::init_service(app(state)).await;

    let (status, body) = call!(
        service,
        test::TestRequest::get().uri("/api/geolocation/SW1A%201AA?countryCode=GB")
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timezone"], "Europe/London");
    assert_near(&body, 51.5074, -0.1278, 1.0);
}
