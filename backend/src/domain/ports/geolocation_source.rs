//! Driven port for the third-party postal-code geocoder.
//!
//! The provider returns coordinates and a UTC offset only; zone naming is a
//! domain concern handled by the resolver.

use async_trait::async_trait;

use crate::domain::{CountryCode, Coordinates, PostalCode};

use super::define_port_error;

/// Raw provider answer for a postal code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderLocation {
    /// Provider coordinates.
    pub coordinates: Coordinates,
    /// Offset from UTC in seconds.
    pub utc_offset_seconds: i32,
}

define_port_error! {
    /// Errors surfaced while calling the geocoding provider.
    pub enum GeoLocationSourceError {
        /// The provider does not know the postal code (HTTP 404).
        NotFound => "postal code not recognised by provider",
        /// The provider rejected the credentials (HTTP 401).
        Unauthorized => "provider rejected the API key",
        /// Unexpected HTTP status.
        Status { status: u16 } => "provider returned status {status}",
        /// Network transport failed or timed out before a response arrived.
        Transport { message: String } => "provider transport failed: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "provider response decode failed: {message}",
    }
}

/// Port for resolving postal codes against the provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocationSource: Send + Sync {
    /// Whether usable credentials are configured. When `false` the resolver
    /// never calls [`Self::fetch`].
    fn is_configured(&self) -> bool;

    /// Look up a postal code. Single attempt, no retry.
    async fn fetch(
        &self,
        postal_code: &PostalCode,
        country: &CountryCode,
    ) -> Result<ProviderLocation, GeoLocationSourceError>;
}
