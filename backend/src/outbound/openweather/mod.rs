//! OpenWeather outbound adapters.
//!
//! One current-weather endpoint backs two ports: postal-code geocoding
//! ([`OpenWeatherGeoLocationSource`]) and weather lookups
//! ([`OpenWeatherWeatherSource`]). Both share an [`OpenWeatherEndpoint`].

mod api_key;
mod dto;
mod geolocation_source;
mod weather_source;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

pub use api_key::ApiKey;
pub use geolocation_source::OpenWeatherGeoLocationSource;
pub use weather_source::OpenWeatherWeatherSource;

/// Default provider URL.
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Shared HTTP client, endpoint and optional credentials.
#[derive(Debug, Clone)]
pub struct OpenWeatherEndpoint {
    client: Client,
    url: Url,
    api_key: Option<ApiKey>,
}

/// Status and body of a completed provider call.
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl OpenWeatherEndpoint {
    /// Build an endpoint using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        url: Url,
        api_key: Option<ApiKey>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            api_key,
        })
    }

    /// Whether usable credentials are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// GET the endpoint with `query` plus `appid`. Returns `Ok(None)` without
    /// touching the network when no key is configured.
    async fn get(&self, query: &[(&str, String)]) -> Result<Option<RawResponse>, reqwest::Error> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };
        let response = self
            .client
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .query(&[("appid", api_key.expose())])
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(Some(RawResponse { status, body }))
    }
}

fn transport_message(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timed out: {error}")
    } else {
        error.to_string()
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
