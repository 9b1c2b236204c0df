//! Weather decoration service.
//!
//! Fetches current conditions for users in small concurrent batches with a
//! pause between batches to stay under provider rate limits. Every failure
//! degrades to [`WeatherReport::mock`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{ProviderWeather, WeatherQuery, WeatherSource};
use crate::domain::{Coordinates, User, UserWithWeather, WeatherCondition, WeatherReport};

/// Async sleep abstraction so batch pacing can be observed in tests.
#[async_trait]
pub trait BatchSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl BatchSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Batch pacing for [`WeatherQuery::annotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherBatchConfig {
    /// Users fetched concurrently per batch; zero is treated as one.
    pub batch_size: usize,
    /// Pause between consecutive batches.
    pub batch_delay: Duration,
}

impl Default for WeatherBatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_delay: Duration::from_millis(100),
        }
    }
}

/// Service implementing [`WeatherQuery`].
#[derive(Clone)]
pub struct WeatherService<S> {
    source: Arc<S>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn BatchSleeper>,
    config: WeatherBatchConfig,
}

impl<S> WeatherService<S> {
    /// Create a new service.
    pub fn new(
        source: Arc<S>,
        clock: Arc<dyn Clock>,
        sleeper: Arc<dyn BatchSleeper>,
        config: WeatherBatchConfig,
    ) -> Self {
        Self {
            source,
            clock,
            sleeper,
            config,
        }
    }

    fn from_provider(&self, reading: ProviderWeather) -> WeatherReport {
        WeatherReport {
            temp: reading.temp.round(),
            condition: WeatherCondition::classify(&reading.description),
            description: reading.description,
            icon: reading.icon,
            humidity: reading.humidity,
            wind_speed: reading.wind_speed.round(),
            timestamp: self.clock.utc(),
        }
    }
}

#[async_trait]
impl<S> WeatherQuery for WeatherService<S>
where
    S: WeatherSource,
{
    async fn current_weather(&self, coordinates: Coordinates) -> WeatherReport {
        if !self.source.is_configured() {
            debug!("weather provider not configured; using mock weather");
            return WeatherReport::mock(coordinates, self.clock.utc());
        }

        match self.source.current(coordinates).await {
            Ok(reading) => self.from_provider(reading),
            Err(error) => {
                warn!(%error, "weather lookup failed; using mock weather");
                WeatherReport::mock(coordinates, self.clock.utc())
            }
        }
    }

    async fn annotate(&self, users: Vec<User>) -> Vec<UserWithWeather> {
        let batch_size = self.config.batch_size.max(1);
        let mut annotated = Vec::with_capacity(users.len());
        let mut pending = users.into_iter().peekable();

        while pending.peek().is_some() {
            let batch: Vec<User> = pending.by_ref().take(batch_size).collect();
            let reports = join_all(
                batch
                    .iter()
                    .map(|user| self.current_weather(user.location().coordinates())),
            )
            .await;
            annotated.extend(
                batch
                    .into_iter()
                    .zip(reports)
                    .map(|(user, weather)| UserWithWeather {
                        user,
                        weather: Some(weather),
                    }),
            );

            if pending.peek().is_some() {
                self.sleeper.sleep(self.config.batch_delay).await;
            }
        }

        annotated
    }
}
