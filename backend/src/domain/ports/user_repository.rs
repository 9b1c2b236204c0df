//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId, ZipCode};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Driven port over the user document collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, in no particular order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Users whose zip code equals `zip_code`.
    async fn list_by_zip_code(&self, zip_code: &ZipCode)
    -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert or replace a user record keyed by its identifier.
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove a user. Returns `false` when no record existed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
