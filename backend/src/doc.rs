//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI document for the REST API. It
//! registers every handler under `inbound::http` together with the schema
//! mirrors from [`crate::inbound::http::schemas`], which document the domain
//! types without coupling them to utoipa.
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::geolocation::PostalCodeValidity;
use crate::inbound::http::health::HealthSummary;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorResponseSchema, FieldErrorSchema, GeoLocationSchema,
    MessageEnvelopeSchema, UserEnvelopeSchema, UserListEnvelopeSchema, UserSchema,
    UserWithWeatherSchema, WeatherConditionSchema, WeatherReportSchema,
};
use crate::inbound::http::users::UserPayload;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geodir backend API",
        description = "User directory with postal-code geolocation and weather annotations.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::list_users_near,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::geolocation::lookup_postal_code,
        crate::inbound::http::geolocation::validate_postal_code,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        UserWithWeatherSchema,
        UserPayload,
        UserEnvelopeSchema,
        UserListEnvelopeSchema,
        MessageEnvelopeSchema,
        GeoLocationSchema,
        PostalCodeValidity,
        WeatherReportSchema,
        WeatherConditionSchema,
        ErrorResponseSchema,
        ErrorCodeSchema,
        FieldErrorSchema,
        HealthSummary,
    )),
    tags(
        (name = "users", description = "User directory CRUD and search"),
        (name = "geolocation", description = "Postal-code resolution"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document covering every route under `/api` plus the health checks.
pub struct ApiDoc;
