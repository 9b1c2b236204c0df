//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL user repository via Diesel, plus the
//!   in-memory store used in mock mode
//! - **openweather**: reqwest clients for geocoding and current weather
//! - **cache**: in-process TTL cache for resolved locations
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod openweather;
pub mod persistence;
