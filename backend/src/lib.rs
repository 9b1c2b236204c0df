//! Geodir backend: a user directory whose records carry a location and
//! timezone resolved from their postal code.
//!
//! Layout follows a hexagonal split:
//! - [`domain`] holds value types, services and ports.
//! - [`inbound`] adapts HTTP requests onto the driving ports.
//! - [`outbound`] implements the driven ports (PostgreSQL, OpenWeather,
//!   caching).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
