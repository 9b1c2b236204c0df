//! Tests for users API handlers.

use super::*;
use crate::domain::ports::{
    MockGeoLocationQuery, MockUsersCommand, MockUsersQuery, MockWeatherQuery,
};
use crate::domain::{WeatherReport, sample_users};
use crate::inbound::http::state::HttpStatePorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;

#[fixture]
fn users() -> Vec<User> {
    sample_users(Utc::now()).expect("sample users")
}

fn test_app(
    users: MockUsersQuery,
    command: MockUsersCommand,
    weather: MockWeatherQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(HttpStatePorts {
        users: Arc::new(users),
        users_command: Arc::new(command),
        geolocation: Arc::new(MockGeoLocationQuery::new()),
        weather: Arc::new(weather),
    });
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api")
            .service(list_users)
            .service(list_users_near)
            .service(get_user)
            .service(create_user)
            .service(update_user)
            .service(delete_user),
    )
}

async fn send(
    app: App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + 'static,
    >,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let service = actix_test::init_service(app).await;
    let response = actix_test::call_service(&service, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn field_errors(body: &Value) -> Vec<(&str, &str)> {
    body["data"]
        .as_array()
        .expect("field errors")
        .iter()
        .map(|entry| {
            (
                entry["field"].as_str().expect("field"),
                entry["message"].as_str().expect("message"),
            )
        })
        .collect()
}

#[rstest]
#[actix_web::test]
async fn list_wraps_users_in_envelope(users: Vec<User>) {
    let mut query = MockUsersQuery::new();
    let stored = users.clone();
    query
        .expect_list_users()
        .times(1)
        .returning(move || Ok(stored.clone()));

    let (status, body) = send(
        test_app(query, MockUsersCommand::new(), MockWeatherQuery::new()),
        actix_test::TestRequest::get().uri("/api/users"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Found 2 users");
    assert_eq!(body["data"][0]["name"], "John Doe");
    assert_eq!(body["data"][1]["zipCode"], "90210");
    assert!(body["data"][0].get("weather").is_none());
}

#[rstest]
#[actix_web::test]
async fn list_filters_by_zip_code(users: Vec<User>) {
    let mut query = MockUsersQuery::new();
    let first = users[0].clone();
    query
        .expect_list_by_zip_code()
        .withf(|zip_code| zip_code.as_ref() == "10001")
        .times(1)
        .returning(move |_| Ok(vec![first.clone()]));

    let (status, body) = send(
        test_app(query, MockUsersCommand::new(), MockWeatherQuery::new()),
        actix_test::TestRequest::get().uri("/api/users?zipCode=10001"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found 1 users");
    assert_eq!(body["data"][0]["zipCode"], "10001");
}

#[rstest]
#[case("/api/users?zipCode=abc")]
#[case("/api/users?zipCode=%D9%A1%D9%A0%D9%A0%D9%A0%D9%A1")]
#[actix_web::test]
async fn list_rejects_malformed_zip_filter(#[case] uri: &str) {
    let (status, body) = send(
        test_app(
            MockUsersQuery::new(),
            MockUsersCommand::new(),
            MockWeatherQuery::new(),
        ),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        field_errors(&body),
        vec![("zipCode", "Zip code must be in format 12345 or 12345-6789")]
    );
}

#[rstest]
#[actix_web::test]
async fn list_attaches_weather_when_requested(users: Vec<User>) {
    let mut query = MockUsersQuery::new();
    let stored = users.clone();
    query
        .expect_list_users()
        .times(1)
        .returning(move || Ok(stored.clone()));
    let mut weather = MockWeatherQuery::new();
    weather.expect_annotate().times(1).returning(|users| {
        users
            .into_iter()
            .map(|user| {
                let report = WeatherReport::mock(user.location().coordinates(), Utc::now());
                UserWithWeather {
                    user,
                    weather: Some(report),
                }
            })
            .collect()
    });

    let (status, body) = send(
        test_app(query, MockUsersCommand::new(), weather),
        actix_test::TestRequest::get().uri("/api/users?includeWeather=true"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found 2 users");
    assert_eq!(body["data"][0]["name"], "John Doe");
    assert!(body["data"][0]["weather"]["temp"].is_number());
    assert!(body["data"][1]["weather"]["condition"].is_string());
}

#[rstest]
#[actix_web::test]
async fn near_uses_default_radius(users: Vec<User>) {
    let mut query = MockUsersQuery::new();
    let first = users[0].clone();
    query
        .expect_list_near()
        .withf(|centre, radius_km| {
            (centre.latitude() - 40.7).abs() < 1e-9
                && (centre.longitude() + 74.0).abs() < 1e-9
                && (*radius_km - DEFAULT_NEAR_RADIUS_KM).abs() < f64::EPSILON
        })
        .times(1)
        .returning(move |_, _| Ok(vec![first.clone()]));

    let (status, body) = send(
        test_app(query, MockUsersCommand::new(), MockWeatherQuery::new()),
        actix_test::TestRequest::get().uri("/api/users/near?latitude=40.7&longitude=-74.0"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found 1 users");
}

#[rstest]
#[case("/api/users/near?latitude=91&longitude=0", "latitude")]
#[case("/api/users/near?latitude=0&longitude=-181", "longitude")]
#[actix_web::test]
async fn near_rejects_out_of_range_coordinates(#[case] uri: &str, #[case] field: &str) {
    let (status, body) = send(
        test_app(
            MockUsersQuery::new(),
            MockUsersCommand::new(),
            MockWeatherQuery::new(),
        ),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_errors(&body)[0].0, field);
}

#[rstest]
#[actix_web::test]
async fn get_returns_single_user(users: Vec<User>) {
    let mut query = MockUsersQuery::new();
    let first = users[0].clone();
    query
        .expect_get_user()
        .withf(|id| id.as_ref() == "6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e01")
        .times(1)
        .returning(move |_| Ok(first.clone()));

    let (status, body) = send(
        test_app(query, MockUsersCommand::new(), MockWeatherQuery::new()),
        actix_test::TestRequest::get().uri("/api/users/6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e01"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timezone"], "America/New_York");
    assert!(body.get("message").is_none());
}

#[rstest]
#[case("not-a-uuid")]
#[case("12345")]
#[actix_web::test]
async fn malformed_id_is_not_found(#[case] id: &str) {
    let (status, body) = send(
        test_app(
            MockUsersQuery::new(),
            MockUsersCommand::new(),
            MockWeatherQuery::new(),
        ),
        actix_test::TestRequest::get().uri(&format!("/api/users/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "User not found");
}

#[rstest]
#[actix_web::test]
async fn unknown_user_propagates_not_found() {
    let mut query = MockUsersQuery::new();
    query
        .expect_get_user()
        .times(1)
        .returning(|_| Err(Error::not_found(USER_NOT_FOUND)));

    let (status, body) = send(
        test_app(query, MockUsersCommand::new(), MockWeatherQuery::new()),
        actix_test::TestRequest::get().uri("/api/users/6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e99"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_user(users: Vec<User>) {
    let mut command = MockUsersCommand::new();
    let created = users[0].clone();
    command
        .expect_create_user()
        .withf(|request| request.name.as_ref() == "John Doe" && request.zip_code.as_ref() == "10001")
        .times(1)
        .returning(move |_| Ok(created.clone()));

    let (status, body) = send(
        test_app(MockUsersQuery::new(), command, MockWeatherQuery::new()),
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": " John Doe ", "zipCode": "10001"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["id"], "6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e01");
}

#[rstest]
#[actix_web::test]
async fn create_reports_all_field_errors() {
    let (status, body) = send(
        test_app(
            MockUsersQuery::new(),
            MockUsersCommand::new(),
            MockWeatherQuery::new(),
        ),
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": 42})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(
        field_errors(&body),
        vec![
            ("name", "Name must be a string"),
            ("zipCode", "Zip code is required"),
        ]
    );
}

#[rstest]
#[actix_web::test]
async fn create_rejects_non_ascii_zip_digits() {
    let (status, body) = send(
        test_app(
            MockUsersQuery::new(),
            MockUsersCommand::new(),
            MockWeatherQuery::new(),
        ),
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "John Doe", "zipCode": "\u{661}\u{660}\u{660}\u{660}\u{661}"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        field_errors(&body),
        vec![("zipCode", "Zip code must be in format 12345 or 12345-6789")]
    );
}

#[rstest]
#[actix_web::test]
async fn update_applies_partial_change(users: Vec<User>) {
    let mut command = MockUsersCommand::new();
    let updated = users[1].clone();
    command
        .expect_update_user()
        .withf(|id, request| {
            id.as_ref() == "6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e02"
                && request.name().is_none()
                && request.zip_code().map(AsRef::as_ref) == Some("90210")
        })
        .times(1)
        .returning(move |_, _| Ok(updated.clone()));

    let (status, body) = send(
        test_app(MockUsersQuery::new(), command, MockWeatherQuery::new()),
        actix_test::TestRequest::put()
            .uri("/api/users/6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e02")
            .set_json(json!({"zipCode": "90210"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["name"], "Jane Smith");
}

#[rstest]
#[actix_web::test]
async fn update_requires_at_least_one_field() {
    let (status, body) = send(
        test_app(
            MockUsersQuery::new(),
            MockUsersCommand::new(),
            MockWeatherQuery::new(),
        ),
        actix_test::TestRequest::put()
            .uri("/api/users/6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e02")
            .set_json(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "At least one field (name or zipCode) must be provided for update"
    );
}

#[rstest]
#[actix_web::test]
async fn delete_confirms_removal() {
    let mut command = MockUsersCommand::new();
    command
        .expect_delete_user()
        .withf(|id| id.as_ref() == "6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e01")
        .times(1)
        .returning(|_| Ok(()));

    let (status, body) = send(
        test_app(MockUsersQuery::new(), command, MockWeatherQuery::new()),
        actix_test::TestRequest::delete().uri("/api/users/6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e01"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User deleted successfully");
    assert!(body.get("data").is_none());
}
