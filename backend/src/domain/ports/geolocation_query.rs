//! Driving port for postal-code resolution.

use async_trait::async_trait;

use crate::domain::{CountryCode, Error, GeoLocation, PostalCode};

/// Resolve postal codes to locations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocationQuery: Send + Sync {
    /// Resolve a postal code. Upstream failures degrade to mock data; only a
    /// provider-confirmed unknown code is an error (`InvalidRequest`).
    async fn lookup(
        &self,
        postal_code: &PostalCode,
        country: &CountryCode,
    ) -> Result<GeoLocation, Error>;

    /// `true` unless the provider reports the code as unknown.
    async fn is_resolvable(&self, postal_code: &PostalCode, country: &CountryCode) -> bool {
        self.lookup(postal_code, country).await.is_ok()
    }
}
