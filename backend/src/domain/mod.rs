//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed directory model, the postal-code
//! resolver and the user and weather services. Nothing here depends on
//! actix, reqwest or Diesel; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - User and its value types (UserId, UserName, ZipCode).
//! - GeoLocation and resolver inputs (PostalCode, CountryCode, Coordinates).
//! - GeoLocationService, UserService, WeatherService — driving port
//!   implementations.

pub mod error;
pub mod geolocation;
pub mod geolocation_service;
pub mod mock_location;
pub mod ports;
pub mod timezone;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod weather;
pub mod weather_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::geolocation::{
    Coordinates, CountryCode, DEFAULT_COUNTRY, GeoLocation, GeoValidationError, PostalCode,
};
pub use self::geolocation_service::GeoLocationService;
pub use self::mock_location::{MockLocationGenerator, MockRegion};
pub use self::timezone::{format_utc_offset, resolve_timezone};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserName, UserValidationError, ZipCode};
pub use self::user_service::{UserService, sample_users};
pub use self::weather::{UserWithWeather, WeatherCondition, WeatherReport};
pub use self::weather_service::{BatchSleeper, TokioSleeper, WeatherBatchConfig, WeatherService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use geodir_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
