//! Postal-code geocoding against the OpenWeather current-weather endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::dto::LocationResponseDto;
use super::{OpenWeatherEndpoint, RawResponse, body_preview, transport_message};
use crate::domain::ports::{GeoLocationSource, GeoLocationSourceError, ProviderLocation};
use crate::domain::{CountryCode, PostalCode};

/// [`GeoLocationSource`] backed by OpenWeather's `zip=` lookup.
#[derive(Debug, Clone)]
pub struct OpenWeatherGeoLocationSource {
    endpoint: OpenWeatherEndpoint,
}

impl OpenWeatherGeoLocationSource {
    /// Adapter issuing lookups against `endpoint`.
    pub fn new(endpoint: OpenWeatherEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl GeoLocationSource for OpenWeatherGeoLocationSource {
    fn is_configured(&self) -> bool {
        self.endpoint.is_configured()
    }

    async fn fetch(
        &self,
        postal_code: &PostalCode,
        country: &CountryCode,
    ) -> Result<ProviderLocation, GeoLocationSourceError> {
        let query = [(
            "zip",
            format!("{},{}", postal_code.as_ref(), country.as_ref()),
        )];
        let raw = self
            .endpoint
            .get(&query)
            .await
            .map_err(|error| GeoLocationSourceError::transport(transport_message(&error)))?
            .ok_or_else(GeoLocationSourceError::unauthorized)?;
        decode(raw)
    }
}

fn decode(raw: RawResponse) -> Result<ProviderLocation, GeoLocationSourceError> {
    match raw.status {
        StatusCode::NOT_FOUND => return Err(GeoLocationSourceError::not_found()),
        StatusCode::UNAUTHORIZED => return Err(GeoLocationSourceError::unauthorized()),
        status if !status.is_success() => {
            tracing::debug!(
                status = status.as_u16(),
                body = %body_preview(&raw.body),
                "geocoding provider returned an error status"
            );
            return Err(GeoLocationSourceError::status(status.as_u16()));
        }
        _ => {}
    }

    let dto: LocationResponseDto = serde_json::from_slice(&raw.body).map_err(|error| {
        GeoLocationSourceError::decode(format!("invalid geocoding payload: {error}"))
    })?;
    dto.into_provider_location()
        .map_err(GeoLocationSourceError::decode)
}
