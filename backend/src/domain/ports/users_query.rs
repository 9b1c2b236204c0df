//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to read the directory
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Coordinates, Error, User, UserId, ZipCode};

/// Default search radius for proximity queries, in kilometres.
pub const DEFAULT_NEAR_RADIUS_KM: f64 = 50.0;

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user, or a not-found error.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;

    /// Users registered under `zip_code`, newest first.
    async fn list_by_zip_code(&self, zip_code: &ZipCode) -> Result<Vec<User>, Error>;

    /// Users within `radius_km` great-circle kilometres of `centre`, nearest
    /// first.
    async fn list_near(&self, centre: Coordinates, radius_km: f64) -> Result<Vec<User>, Error>;
}
