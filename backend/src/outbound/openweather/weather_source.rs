//! Current-weather lookups against OpenWeather in imperial units.

use async_trait::async_trait;

use super::dto::WeatherResponseDto;
use super::{OpenWeatherEndpoint, RawResponse, body_preview, transport_message};
use crate::domain::Coordinates;
use crate::domain::ports::{ProviderWeather, WeatherSource, WeatherSourceError};

/// HTTP status reported when the adapter is asked to call without a key.
const UNAUTHORIZED_STATUS: u16 = 401;

/// [`WeatherSource`] backed by the OpenWeather current weather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherWeatherSource {
    endpoint: OpenWeatherEndpoint,
}

impl OpenWeatherWeatherSource {
    /// Adapter sharing `endpoint` with the geolocation source.
    pub fn new(endpoint: OpenWeatherEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherWeatherSource {
    fn is_configured(&self) -> bool {
        self.endpoint.is_configured()
    }

    async fn current(
        &self,
        coordinates: Coordinates,
    ) -> Result<ProviderWeather, WeatherSourceError> {
        let query = [
            ("lat", coordinates.latitude().to_string()),
            ("lon", coordinates.longitude().to_string()),
            ("units", "imperial".to_owned()),
        ];
        let raw = self
            .endpoint
            .get(&query)
            .await
            .map_err(|error| WeatherSourceError::transport(transport_message(&error)))?
            .ok_or_else(|| WeatherSourceError::status(UNAUTHORIZED_STATUS))?;
        decode(raw)
    }
}

fn decode(raw: RawResponse) -> Result<ProviderWeather, WeatherSourceError> {
    if !raw.status.is_success() {
        tracing::debug!(
            status = raw.status.as_u16(),
            body = %body_preview(&raw.body),
            "weather provider returned an error status"
        );
        return Err(WeatherSourceError::status(raw.status.as_u16()));
    }
    let dto: WeatherResponseDto = serde_json::from_slice(&raw.body)
        .map_err(|error| WeatherSourceError::decode(format!("invalid weather payload: {error}")))?;
    dto.into_provider_weather()
        .map_err(WeatherSourceError::decode)
}
