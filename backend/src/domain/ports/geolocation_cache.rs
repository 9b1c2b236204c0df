//! Driven port for caching provider-resolved locations.

use async_trait::async_trait;

use crate::domain::{CountryCode, GeoLocation, PostalCode};

/// Cache key: a postal code within a country.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeoLocationCacheKey {
    /// Normalised postal code.
    pub postal_code: PostalCode,
    /// Country the code belongs to.
    pub country: CountryCode,
}

impl GeoLocationCacheKey {
    /// Build a key from resolver inputs.
    pub fn new(postal_code: &PostalCode, country: &CountryCode) -> Self {
        Self {
            postal_code: postal_code.clone(),
            country: country.clone(),
        }
    }
}

/// Port for a time-bounded location cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocationCache: Send + Sync {
    /// Fresh cached entry, if any.
    async fn get(&self, key: &GeoLocationCacheKey) -> Option<GeoLocation>;

    /// Store an entry, replacing any previous one.
    async fn put(&self, key: GeoLocationCacheKey, location: GeoLocation);
}

/// Cache that never stores anything. Used when caching is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpGeoLocationCache;

#[async_trait]
impl GeoLocationCache for NoOpGeoLocationCache {
    async fn get(&self, _key: &GeoLocationCacheKey) -> Option<GeoLocation> {
        None
    }

    async fn put(&self, _key: GeoLocationCacheKey, _location: GeoLocation) {}
}
