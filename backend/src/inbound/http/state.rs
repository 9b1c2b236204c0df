//! Shared HTTP adapter state.
//!
//! Handlers accept this via `web::Data` and depend only on domain ports, so
//! they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{GeoLocationQuery, UsersCommand, UsersQuery, WeatherQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Read side of the user directory.
    pub users: Arc<dyn UsersQuery>,
    /// Write side of the user directory.
    pub users_command: Arc<dyn UsersCommand>,
    /// Postal-code resolver.
    pub geolocation: Arc<dyn GeoLocationQuery>,
    /// Weather decorator.
    pub weather: Arc<dyn WeatherQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User listing and lookup.
    pub users: Arc<dyn UsersQuery>,
    /// User creation, update and deletion.
    pub users_command: Arc<dyn UsersCommand>,
    /// Postal-code resolution.
    pub geolocation: Arc<dyn GeoLocationQuery>,
    /// Weather lookups and annotation.
    pub weather: Arc<dyn WeatherQuery>,
}

impl HttpState {
    /// Unpack the ports into handler state.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_command,
            geolocation,
            weather,
        } = ports;
        Self {
            users,
            users_command,
            geolocation,
            weather,
        }
    }
}
