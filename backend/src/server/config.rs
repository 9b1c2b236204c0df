//! Server settings loaded via OrthoConfig from CLI flags, `GEODIR_*`
//! environment variables and configuration files.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use geodir_backend::domain::WeatherBatchConfig;
use geodir_backend::outbound::openweather::DEFAULT_OPENWEATHER_URL;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Runtime configuration for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GEODIR")]
pub struct ServerSettings {
    /// Interface to listen on; defaults to all interfaces.
    pub bind_address: Option<String>,
    /// TCP port to listen on.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// OpenWeather API key. Missing or placeholder keys select mock data.
    pub openweather_api_key: Option<String>,
    /// Override for the OpenWeather endpoint.
    pub openweather_url: Option<String>,
    /// Outbound HTTP timeout in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. Absent selects the in-memory store.
    pub database_url: Option<String>,
    /// Seed the two sample users into an empty store. Unset means seed;
    /// read it through the `seed_sample_users()` accessor.
    pub seed_sample_users: Option<bool>,
    /// Lifetime of cached provider lookups; zero disables the cache.
    #[ortho_config(default = 0)]
    pub geolocation_cache_ttl_secs: u64,
    /// Users fetched concurrently per weather batch.
    #[ortho_config(default = 5)]
    pub weather_batch_size: usize,
    /// Pause between weather batches in milliseconds.
    #[ortho_config(default = 100)]
    pub weather_batch_delay_ms: u64,
    /// Browser frontend allowed to call the API cross-origin.
    pub frontend_url: Option<String>,
}

impl ServerSettings {
    /// Address and port for `HttpServer::bind`.
    pub fn bind_target(&self) -> (&str, u16) {
        (
            self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS),
            self.port,
        )
    }

    /// Configured provider endpoint, falling back to the public API.
    pub fn openweather_url(&self) -> &str {
        self.openweather_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENWEATHER_URL)
    }

    /// Frontend URL for CORS, falling back to the local development server.
    pub fn frontend_url(&self) -> &str {
        self.frontend_url.as_deref().unwrap_or(DEFAULT_FRONTEND_URL)
    }

    /// Whether an empty store receives the sample users. Defaults to `true`.
    pub fn seed_sample_users(&self) -> bool {
        self.seed_sample_users.unwrap_or(true)
    }

    /// Timeout applied to every outbound OpenWeather request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `None` when caching is disabled.
    pub fn geolocation_cache_ttl(&self) -> Option<Duration> {
        (self.geolocation_cache_ttl_secs > 0)
            .then(|| Duration::from_secs(self.geolocation_cache_ttl_secs))
    }

    /// Batch size and pacing for weather annotation. The size is at least one.
    pub fn weather_batch(&self) -> WeatherBatchConfig {
        WeatherBatchConfig {
            batch_size: self.weather_batch_size.max(1),
            batch_delay: Duration::from_millis(self.weather_batch_delay_ms),
        }
    }
}
