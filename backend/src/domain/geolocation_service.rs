//! Postal-code resolver.
//!
//! Resolution is layered:
//! - no usable provider credentials: synthesise a mock location;
//! - cached provider answer still fresh: return it;
//! - provider answer: infer the zone name and cache the result;
//! - provider says the code is unknown: invalid request;
//! - any other provider failure: log and synthesise a mock location.
//!
//! Mock results are never cached.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    GeoLocationCache, GeoLocationCacheKey, GeoLocationQuery, GeoLocationSource,
    GeoLocationSourceError,
};
use crate::domain::{
    CountryCode, Error, GeoLocation, MockLocationGenerator, PostalCode, resolve_timezone,
};

/// Resolver implementing [`GeoLocationQuery`].
pub struct GeoLocationService<S, C> {
    source: Arc<S>,
    cache: Arc<C>,
    mock: MockLocationGenerator,
}

impl<S, C> GeoLocationService<S, C> {
    /// Create a resolver over a provider and cache.
    pub fn new(source: Arc<S>, cache: Arc<C>) -> Self {
        Self::with_mock_generator(source, cache, MockLocationGenerator::default())
    }

    /// Create a resolver with an explicit mock generator, for reproducible
    /// output.
    pub fn with_mock_generator(
        source: Arc<S>,
        cache: Arc<C>,
        mock: MockLocationGenerator,
    ) -> Self {
        Self {
            source,
            cache,
            mock,
        }
    }
}

impl<S, C> GeoLocationService<S, C>
where
    S: GeoLocationSource,
    C: GeoLocationCache,
{
    fn invalid_postal_code(postal_code: &PostalCode) -> Error {
        let message = format!("Invalid postal code: {postal_code}");
        Error::invalid_request(message.clone()).with_details(json!([{
            "field": "zipCode",
            "message": message,
        }]))
    }

    fn fallback(&self, postal_code: &PostalCode, country: &CountryCode) -> GeoLocation {
        let location = self.mock.generate(postal_code, country);
        debug!(
            postal_code = %postal_code,
            country = %country,
            timezone = location.timezone(),
            "using mock location"
        );
        location
    }
}

#[async_trait]
impl<S, C> GeoLocationQuery for GeoLocationService<S, C>
where
    S: GeoLocationSource,
    C: GeoLocationCache,
{
    async fn lookup(
        &self,
        postal_code: &PostalCode,
        country: &CountryCode,
    ) -> Result<GeoLocation, Error> {
        if !self.source.is_configured() {
            return Ok(self.fallback(postal_code, country));
        }

        let key = GeoLocationCacheKey::new(postal_code, country);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(postal_code = %postal_code, country = %country, "geolocation cache hit");
            return Ok(hit);
        }

        match self.source.fetch(postal_code, country).await {
            Ok(found) => {
                let coordinates = found.coordinates;
                let timezone =
                    resolve_timezone(country, coordinates.longitude(), found.utc_offset_seconds);
                let location = GeoLocation::new(coordinates, timezone)
                    .map_err(|err| Error::internal(format!("resolved location invalid: {err}")))?;
                info!(
                    postal_code = %postal_code,
                    country = %country,
                    latitude = location.latitude(),
                    longitude = location.longitude(),
                    timezone = location.timezone(),
                    "resolved postal code"
                );
                self.cache.put(key, location.clone()).await;
                Ok(location)
            }
            Err(GeoLocationSourceError::NotFound) => Err(Self::invalid_postal_code(postal_code)),
            Err(GeoLocationSourceError::Unauthorized) => {
                warn!("geocoding provider rejected the API key; falling back to mock data");
                Ok(self.fallback(postal_code, country))
            }
            Err(error) => {
                warn!(%error, postal_code = %postal_code, "geocoding failed; falling back to mock data");
                Ok(self.fallback(postal_code, country))
            }
        }
    }
}
