//! Builders for HTTP state ports from server settings.
//!
//! The user store is PostgreSQL when a database URL is configured and an
//! in-memory map otherwise. Both OpenWeather adapters are always built; with
//! no usable key they report themselves unconfigured and the services serve
//! mock data.

use std::sync::Arc;

use chrono::Utc;
use mockable::{Clock, DefaultClock};
use reqwest::Url;
use thiserror::Error;
use tracing::{info, warn};

use geodir_backend::domain::ports::{
    GeoLocationQuery, NoOpGeoLocationCache, UserRepository, UsersCommand, UsersQuery,
};
use geodir_backend::domain::{
    Error, GeoLocationService, TokioSleeper, UserService, WeatherService, sample_users,
};
use geodir_backend::inbound::http::state::{HttpState, HttpStatePorts};
use geodir_backend::middleware::InvalidOrigin;
use geodir_backend::outbound::cache::InMemoryGeoLocationCache;
use geodir_backend::outbound::openweather::{
    ApiKey, OpenWeatherEndpoint, OpenWeatherGeoLocationSource, OpenWeatherWeatherSource,
};
use geodir_backend::outbound::persistence::{
    DbPool, DieselUserRepository, InMemoryUserRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations,
};

use super::ServerSettings;

/// Failures that abort start-up.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The OpenWeather URL does not parse.
    #[error("invalid OpenWeather URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
    /// The outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// Schema migrations failed.
    #[error("database migration failed: {0}")]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error("database pool unavailable: {0}")]
    Pool(#[from] PoolError),
    /// Sample users could not be written.
    #[error("sample user seeding failed: {0}")]
    Seed(Error),
    /// The listener socket could not be bound.
    #[error("failed to bind {address}: {message}")]
    Bind { address: String, message: String },
    /// The frontend URL cannot serve as a CORS origin.
    #[error(transparent)]
    InvalidFrontendUrl(#[from] InvalidOrigin),
}

impl From<StartupError> for std::io::Error {
    fn from(error: StartupError) -> Self {
        Self::other(error.to_string())
    }
}

fn build_endpoint(settings: &ServerSettings) -> Result<OpenWeatherEndpoint, StartupError> {
    let raw_url = settings.openweather_url();
    let url = Url::parse(raw_url).map_err(|err| StartupError::InvalidUrl {
        url: raw_url.to_owned(),
        message: err.to_string(),
    })?;
    let api_key = settings.openweather_api_key.as_deref().and_then(ApiKey::parse);
    if api_key.is_none() {
        warn!("no usable OpenWeather API key; serving mock geolocation and weather");
    }
    Ok(OpenWeatherEndpoint::new(
        url,
        api_key,
        settings.request_timeout(),
    )?)
}

fn build_geolocation(
    endpoint: OpenWeatherEndpoint,
    settings: &ServerSettings,
    clock: Arc<dyn Clock>,
) -> Arc<dyn GeoLocationQuery> {
    let source = Arc::new(OpenWeatherGeoLocationSource::new(endpoint));
    match settings.geolocation_cache_ttl() {
        Some(ttl) => {
            info!(ttl_secs = ttl.as_secs(), "geolocation cache enabled");
            let cache = Arc::new(InMemoryGeoLocationCache::new(ttl, clock));
            Arc::new(GeoLocationService::new(source, cache))
        }
        None => Arc::new(GeoLocationService::new(
            source,
            Arc::new(NoOpGeoLocationCache),
        )),
    }
}

/// Write the sample users into `repo` when it holds no records.
async fn seed_if_empty<R: UserRepository>(repo: &R) -> Result<(), StartupError> {
    let existing = repo
        .list_all()
        .await
        .map_err(|err| StartupError::Seed(Error::service_unavailable(err.to_string())))?;
    if !existing.is_empty() {
        return Ok(());
    }
    for user in sample_users(Utc::now()).map_err(StartupError::Seed)? {
        repo.upsert(&user)
            .await
            .map_err(|err| StartupError::Seed(Error::service_unavailable(err.to_string())))?;
    }
    info!("seeded sample users");
    Ok(())
}

fn user_ports<R>(
    repo: Arc<R>,
    geolocation: Arc<dyn GeoLocationQuery>,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn UsersQuery>, Arc<dyn UsersCommand>)
where
    R: UserRepository + 'static,
{
    let service = Arc::new(UserService::new(repo, geolocation, clock));
    (service.clone(), service)
}

async fn build_user_ports(
    settings: &ServerSettings,
    geolocation: Arc<dyn GeoLocationQuery>,
    clock: Arc<dyn Clock>,
) -> Result<(Arc<dyn UsersQuery>, Arc<dyn UsersCommand>), StartupError> {
    let Some(database_url) = settings.database_url.as_deref() else {
        info!("no database configured; using in-memory user store");
        let repo = Arc::new(InMemoryUserRepository::new());
        if settings.seed_sample_users() {
            seed_if_empty(repo.as_ref()).await?;
        }
        return Ok(user_ports(repo, geolocation, clock));
    };

    run_pending_migrations(database_url).await?;
    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    let repo = Arc::new(DieselUserRepository::new(pool));
    if settings.seed_sample_users() {
        seed_if_empty(repo.as_ref()).await?;
    }
    info!("using PostgreSQL user store");
    Ok(user_ports(repo, geolocation, clock))
}

/// Construct the handler state from settings.
///
/// # Errors
///
/// Returns [`StartupError`] when the provider URL is invalid, the HTTP client
/// cannot be built, or the database cannot be migrated, connected or seeded.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState, StartupError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let endpoint = build_endpoint(settings)?;

    let geolocation = build_geolocation(endpoint.clone(), settings, clock.clone());
    let (users, users_command) =
        build_user_ports(settings, geolocation.clone(), clock.clone()).await?;
    let weather = Arc::new(WeatherService::new(
        Arc::new(OpenWeatherWeatherSource::new(endpoint)),
        clock,
        Arc::new(TokioSleeper),
        settings.weather_batch(),
    ));

    Ok(HttpState::new(HttpStatePorts {
        users,
        users_command,
        geolocation,
        weather,
    }))
}
