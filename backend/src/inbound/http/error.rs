//! HTTP adapter mapping for domain errors.
//!
//! Every failure leaves the service as
//! `{success: false, code, error, data?, traceId?}` with the status derived
//! from [`ErrorCode`]. Internal error messages are redacted outside debug
//! builds.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope<'a> {
    success: bool,
    code: ErrorCode,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
}

impl<'a> ErrorEnvelope<'a> {
    fn from_error(error: &'a Error, expose_internal: bool) -> Self {
        let redact = error.code() == ErrorCode::InternalError && !expose_internal;
        Self {
            success: false,
            code: error.code(),
            error: if redact {
                REDACTED_MESSAGE
            } else {
                error.message()
            },
            data: if redact { None } else { error.details() },
            trace_id: error.trace_id(),
        }
    }
}

fn error_body(error: &Error, expose_internal: bool) -> HttpResponse {
    let status = status_for(error.code());
    if status.is_server_error() {
        error!(
            code = ?error.code(),
            message = error.message(),
            trace_id = error.trace_id(),
            "request failed"
        );
    }

    let mut builder = HttpResponse::build(status);
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
    }
    builder.json(ErrorEnvelope::from_error(error, expose_internal))
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        error_body(self, cfg!(debug_assertions))
    }
}

/// Turn JSON body extraction failures into 400 responses in the common
/// envelope.
#[expect(
    clippy::needless_pass_by_value,
    reason = "signature fixed by actix JsonConfig::error_handler"
)]
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected JSON payload");
    Error::invalid_request(format!("Invalid JSON payload: {err}")).into()
}

/// Turn query string extraction failures into 400 responses.
#[expect(
    clippy::needless_pass_by_value,
    reason = "signature fixed by actix QueryConfig::error_handler"
)]
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected query string");
    Error::invalid_request(format!("Invalid query parameters: {err}")).into()
}

#[cfg(test)]
mod tests;
