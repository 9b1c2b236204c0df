//! OpenAPI schema definitions for domain and envelope types.
//!
//! Domain types stay free of utoipa derives; these mirrors live at the edge
//! and exist only for documentation.

#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use chrono::{DateTime, Utc};
use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Field-level validation problem.
#[derive(ToSchema)]
#[schema(as = FieldError)]
pub struct FieldErrorSchema {
    #[schema(example = "zipCode")]
    field: String,
    #[schema(example = "Zip code must be in format 12345 or 12345-6789")]
    message: String,
}

/// Error response envelope.
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[schema(rename_all = "camelCase")]
pub struct ErrorResponseSchema {
    #[schema(example = false)]
    success: bool,
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Validation failed")]
    error: String,
    /// Field errors for validation failures.
    data: Option<Vec<FieldErrorSchema>>,
    /// Correlation identifier, also sent as the `trace-id` header.
    trace_id: Option<String>,
}

/// Resolved location.
#[derive(ToSchema)]
#[schema(as = GeoLocation)]
pub struct GeoLocationSchema {
    #[schema(example = 40.7128)]
    latitude: f64,
    #[schema(example = -74.006)]
    longitude: f64,
    /// IANA zone name or `UTC±HH:MM`.
    #[schema(example = "America/New_York")]
    timezone: String,
}

/// Directory user.
#[derive(ToSchema)]
#[schema(as = User)]
#[schema(rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = "6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e01")]
    id: String,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "10001")]
    zip_code: String,
    latitude: f64,
    longitude: f64,
    #[schema(example = "America/New_York")]
    timezone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Coarse weather bucket.
#[derive(ToSchema)]
#[schema(as = WeatherCondition)]
#[schema(rename_all = "lowercase")]
pub enum WeatherConditionSchema {
    /// Clear sky.
    Sunny,
    /// Cloud cover.
    Cloudy,
    /// Rain or drizzle.
    Rainy,
    /// Snow or sleet.
    Snowy,
    /// Thunder.
    Stormy,
    /// Fog or mist.
    Foggy,
}

/// Current conditions, imperial units.
#[derive(ToSchema)]
#[schema(as = WeatherReport)]
#[schema(rename_all = "camelCase")]
pub struct WeatherReportSchema {
    #[schema(example = 72.0)]
    temp: f64,
    #[schema(example = "light rain")]
    description: String,
    #[schema(example = "10d")]
    icon: String,
    humidity: u32,
    wind_speed: f64,
    condition: WeatherConditionSchema,
    timestamp: DateTime<Utc>,
}

/// User annotated with weather.
#[derive(ToSchema)]
#[schema(as = UserWithWeather)]
#[schema(rename_all = "camelCase")]
pub struct UserWithWeatherSchema {
    id: String,
    name: String,
    zip_code: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Present when `includeWeather=true`.
    weather: Option<WeatherReportSchema>,
}

/// Success envelope for a single user.
#[derive(ToSchema)]
#[schema(as = UserEnvelope)]
pub struct UserEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    data: UserSchema,
    message: Option<String>,
}

/// Success envelope for a user list.
#[derive(ToSchema)]
#[schema(as = UserListEnvelope)]
pub struct UserListEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    /// Users, annotated with `weather` when requested.
    data: Vec<UserWithWeatherSchema>,
    #[schema(example = "Found 2 users")]
    message: String,
}

/// Success envelope without data.
#[derive(ToSchema)]
#[schema(as = MessageEnvelope)]
pub struct MessageEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "User deleted successfully")]
    message: String,
}
