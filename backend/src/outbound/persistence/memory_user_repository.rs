//! In-process user store used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, ZipCode};

/// `UserRepository` backed by a `RwLock<HashMap>`. Contents are lost on
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, e.g. with sample users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (*user.id().as_uuid(), user))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn list_by_zip_code(&self, zip_code: &ZipCode) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.zip_code() == zip_code)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users.read().await.get(id.as_uuid()).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.users
            .write()
            .await
            .insert(*user.id().as_uuid(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.users.write().await.remove(id.as_uuid()).is_some())
    }
}
