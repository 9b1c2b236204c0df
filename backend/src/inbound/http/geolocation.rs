//! Postal-code lookup endpoints.
//!
//! ```text
//! GET /api/geolocation/10001
//! GET /api/geolocation/SW1A%201AA?countryCode=GB
//! GET /api/geolocation/10001/valid
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::{CountryCode, GeoLocation, PostalCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldError, validation_failed};

/// Query parameters for postal-code lookups.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    /// ISO 3166-1 alpha-2 country; defaults to `US`.
    pub country_code: Option<String>,
}

/// Body of the validity check.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostalCodeValidity {
    /// Postal code as submitted, trimmed.
    #[schema(example = "10001")]
    pub postal_code: String,
    /// Country the code was checked against.
    #[schema(example = "US")]
    pub country_code: String,
    /// Whether the provider recognised the code.
    pub valid: bool,
}

fn parse_inputs(
    raw_postal_code: &str,
    params: &LookupParams,
) -> Result<(PostalCode, CountryCode), crate::domain::Error> {
    let mut errors = Vec::new();
    let postal_code = PostalCode::new(raw_postal_code)
        .map_err(|err| {
            errors.push(FieldError {
                field: "postalCode",
                message: err.to_string(),
            });
        })
        .ok();
    let country = match params.country_code.as_deref() {
        None => Some(CountryCode::default()),
        Some(raw) => CountryCode::new(raw)
            .map_err(|err| {
                errors.push(FieldError {
                    field: "countryCode",
                    message: err.to_string(),
                });
            })
            .ok(),
    };
    match (postal_code, country) {
        (Some(postal_code), Some(country)) => Ok((postal_code, country)),
        _ => Err(validation_failed(&errors)),
    }
}

/// Resolve a postal code to coordinates and a timezone.
///
/// Falls back to mock data within the regional band when the provider is
/// unavailable.
#[utoipa::path(
    get,
    path = "/api/geolocation/{postalCode}",
    params(
        ("postalCode" = String, Path, description = "Postal code to resolve"),
        LookupParams
    ),
    responses(
        (status = 200, description = "Resolved location", body = crate::inbound::http::schemas::GeoLocationSchema),
        (status = 400, description = "Malformed or unknown postal code", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["geolocation"],
    operation_id = "lookupPostalCode"
)]
#[get("/geolocation/{postal_code}")]
pub async fn lookup_postal_code(
    state: web::Data<HttpState>,
    postal_code: web::Path<String>,
    params: web::Query<LookupParams>,
) -> ApiResult<web::Json<GeoLocation>> {
    let (postal_code, country) = parse_inputs(&postal_code, &params)?;
    let location = state.geolocation.lookup(&postal_code, &country).await?;
    Ok(web::Json(location))
}

/// Report whether the provider recognises a postal code.
#[utoipa::path(
    get,
    path = "/api/geolocation/{postalCode}/valid",
    params(
        ("postalCode" = String, Path, description = "Postal code to check"),
        LookupParams
    ),
    responses(
        (status = 200, description = "Validity verdict", body = PostalCodeValidity),
        (status = 400, description = "Malformed postal code", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["geolocation"],
    operation_id = "validatePostalCode"
)]
#[get("/geolocation/{postal_code}/valid")]
pub async fn validate_postal_code(
    state: web::Data<HttpState>,
    postal_code: web::Path<String>,
    params: web::Query<LookupParams>,
) -> ApiResult<web::Json<PostalCodeValidity>> {
    let (postal_code, country) = parse_inputs(&postal_code, &params)?;
    let valid = state.geolocation.is_resolvable(&postal_code, &country).await;
    Ok(web::Json(PostalCodeValidity {
        postal_code: postal_code.to_string(),
        country_code: country.to_string(),
        valid,
    }))
}
