//! Tests for HTTP error mapping.

use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn validation_error() -> Error {
    Error::invalid_request("Validation failed")
        .with_trace_id(TRACE_ID)
        .with_details(json!([{ "field": "name", "message": "Name is required" }]))
}

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_follows_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn envelope_carries_message_details_and_trace_id(validation_error: Error) {
    let response = error_body(&validation_error, false);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );

    let body = body_of(response).await;
    assert_eq!(
        body,
        json!({
            "success": false,
            "code": "invalid_request",
            "error": "Validation failed",
            "data": [{ "field": "name", "message": "Name is required" }],
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_when_not_exposed() {
    let error = Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }));

    let body = body_of(error_body(&error, false)).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(body.get("data").is_none());
    assert_eq!(body["traceId"], TRACE_ID);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_visible_when_exposed() {
    let error = Error::internal("connection string leaked");
    let body = body_of(error_body(&error, true)).await;
    assert_eq!(body["error"], "connection string leaked");
    assert_eq!(body["code"], "internal_error");
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header_and_field() {
    let response = error_body(&Error::not_found("User not found"), false);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    let body = body_of(response).await;
    assert!(body.get("traceId").is_none());
}
