//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserName, ZipCode};

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Name to store.
    pub name: UserName,
    /// Zip code to resolve and store.
    pub zip_code: ZipCode,
}

/// Validated partial update. At least one field is set when built through
/// [`UpdateUserRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    name: Option<UserName>,
    zip_code: Option<ZipCode>,
}

impl UpdateUserRequest {
    /// Build a partial update, rejecting an empty one.
    ///
    /// # Errors
    /// Returns an invalid-request error when neither field is supplied.
    pub fn new(name: Option<UserName>, zip_code: Option<ZipCode>) -> Result<Self, Error> {
        if name.is_none() && zip_code.is_none() {
            return Err(Error::invalid_request(
                "At least one field (name or zipCode) must be provided for update",
            ));
        }
        Ok(Self { name, zip_code })
    }

    /// Replacement name, if any.
    pub fn name(&self) -> Option<&UserName> {
        self.name.as_ref()
    }

    /// Replacement zip code, if any.
    pub fn zip_code(&self) -> Option<&ZipCode> {
        self.zip_code.as_ref()
    }
}

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Resolve the zip code, persist and return the new user.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Merge the update into an existing user.
    async fn update_user(&self, id: &UserId, request: UpdateUserRequest) -> Result<User, Error>;

    /// Hard-delete a user.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
