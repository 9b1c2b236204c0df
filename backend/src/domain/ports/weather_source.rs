//! Driven port for the current-weather provider.

use async_trait::async_trait;

use crate::domain::Coordinates;

use super::define_port_error;

/// Provider reading before classification, in imperial units.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderWeather {
    /// Temperature in °F.
    pub temp: f64,
    /// Relative humidity percentage.
    pub humidity: u32,
    /// Wind speed in mph.
    pub wind_speed: f64,
    /// First condition description.
    pub description: String,
    /// First condition icon code.
    pub icon: String,
}

define_port_error! {
    /// Errors surfaced while calling the weather provider.
    pub enum WeatherSourceError {
        /// Unexpected HTTP status.
        Status { status: u16 } => "weather provider returned status {status}",
        /// Network transport failed or timed out.
        Transport { message: String } => "weather provider transport failed: {message}",
        /// The response body could not be decoded or was incomplete.
        Decode { message: String } => "weather provider response decode failed: {message}",
    }
}

/// Port for fetching current weather.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Whether usable credentials are configured.
    fn is_configured(&self) -> bool;

    /// Current conditions at `coordinates`.
    async fn current(&self, coordinates: Coordinates)
    -> Result<ProviderWeather, WeatherSourceError>;
}
