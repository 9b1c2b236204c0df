//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod geolocation_cache;
mod geolocation_query;
mod geolocation_source;
mod user_repository;
mod users_command;
mod users_query;
mod weather_query;
mod weather_source;

#[cfg(test)]
pub use geolocation_cache::MockGeoLocationCache;
pub use geolocation_cache::{GeoLocationCache, GeoLocationCacheKey, NoOpGeoLocationCache};
#[cfg(test)]
pub use geolocation_query::MockGeoLocationQuery;
pub use geolocation_query::GeoLocationQuery;
#[cfg(test)]
pub use geolocation_source::MockGeoLocationSource;
pub use geolocation_source::{GeoLocationSource, GeoLocationSourceError, ProviderLocation};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UpdateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{DEFAULT_NEAR_RADIUS_KM, UsersQuery};
#[cfg(test)]
pub use weather_query::MockWeatherQuery;
pub use weather_query::WeatherQuery;
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{ProviderWeather, WeatherSource, WeatherSourceError};
