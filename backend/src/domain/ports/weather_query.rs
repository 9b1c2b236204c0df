//! Driving port for weather decoration. Infallible: failures degrade to
//! deterministic mock readings.

use async_trait::async_trait;

use crate::domain::{Coordinates, User, UserWithWeather, WeatherReport};

/// Weather lookups for display.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherQuery: Send + Sync {
    /// Current weather at `coordinates`.
    async fn current_weather(&self, coordinates: Coordinates) -> WeatherReport;

    /// Attach weather to each user, preserving input order.
    async fn annotate(&self, users: Vec<User>) -> Vec<UserWithWeather>;
}
