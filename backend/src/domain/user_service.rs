//! User directory service.
//!
//! Implements [`UsersQuery`] and [`UsersCommand`] over a [`UserRepository`],
//! resolving zip codes through a [`GeoLocationQuery`]. Timestamps come from
//! the injected clock.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use haversine::{Location as HaversineLocation, Units, distance};
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateUserRequest, GeoLocationQuery, UpdateUserRequest, UserPersistenceError,
    UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{
    Coordinates, CountryCode, Error, GeoLocation, PostalCode, User, UserId, UserName, ZipCode,
};

/// Domain service for the user directory.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
    geolocation: Arc<dyn GeoLocationQuery>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a new service.
    pub fn new(
        repo: Arc<R>,
        geolocation: Arc<dyn GeoLocationQuery>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            geolocation,
            clock,
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn user_not_found() -> Error {
    Error::not_found("User not found")
}

fn newest_first(users: &mut [User]) {
    users.sort_by_key(|user| std::cmp::Reverse(user.created_at()));
}

fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    distance(
        HaversineLocation {
            latitude: from.latitude(),
            longitude: from.longitude(),
        },
        HaversineLocation {
            latitude: to.latitude(),
            longitude: to.longitude(),
        },
        Units::Kilometers,
    )
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    async fn resolve(&self, zip_code: &ZipCode) -> Result<GeoLocation, Error> {
        // Every valid ZIP is also a valid postal code.
        let postal_code = PostalCode::new(zip_code.as_ref())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.geolocation
            .lookup(&postal_code, &CountryCode::default())
            .await
    }

    async fn require(&self, id: &UserId) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(user_not_found)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let mut users = self.repo.list_all().await.map_err(map_persistence_error)?;
        newest_first(&mut users);
        Ok(users)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.require(id).await
    }

    async fn list_by_zip_code(&self, zip_code: &ZipCode) -> Result<Vec<User>, Error> {
        let mut users = self
            .repo
            .list_by_zip_code(zip_code)
            .await
            .map_err(map_persistence_error)?;
        newest_first(&mut users);
        Ok(users)
    }

    async fn list_near(&self, centre: Coordinates, radius_km: f64) -> Result<Vec<User>, Error> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(Error::invalid_request("radiusKm must be a positive number"));
        }

        let users = self.repo.list_all().await.map_err(map_persistence_error)?;
        let mut nearby: Vec<(f64, User)> = users
            .into_iter()
            .map(|user| (distance_km(centre, user.location().coordinates()), user))
            .filter(|(km, _)| *km <= radius_km)
            .collect();
        nearby.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Ok(nearby.into_iter().map(|(_, user)| user).collect())
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let location = self.resolve(&request.zip_code).await?;
        let user = User::new(
            UserId::random(),
            request.name,
            request.zip_code,
            location,
            self.clock.utc(),
        );
        self.repo
            .upsert(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), zip_code = %user.zip_code(), "created user");
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, request: UpdateUserRequest) -> Result<User, Error> {
        let mut user = self.require(id).await?;

        if let Some(name) = request.name() {
            user.rename(name.clone());
        }
        if let Some(zip_code) = request.zip_code().filter(|zip| *zip != user.zip_code()) {
            let location = self.resolve(zip_code).await?;
            user.relocate(zip_code.clone(), location);
        }
        user.touch(self.clock.utc());

        self.repo
            .upsert(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), "updated user");
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let removed = self.repo.delete(id).await.map_err(map_persistence_error)?;
        if !removed {
            return Err(user_not_found());
        }
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

/// The two directory entries used to seed mock mode.
///
/// # Errors
/// Only fails if the embedded constants stop satisfying validation.
pub fn sample_users(now: DateTime<Utc>) -> Result<Vec<User>, Error> {
    const SAMPLES: [(&str, &str, &str, f64, f64, &str); 2] = [
        (
            "6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e01",
            "John Doe",
            "10001",
            40.7128,
            -74.006,
            "America/New_York",
        ),
        (
            "6b0c8f0e-2f7b-4b8a-9d0e-1a2b3c4d5e02",
            "Jane Smith",
            "90210",
            34.0522,
            -118.2437,
            "America/Los_Angeles",
        ),
    ];

    SAMPLES
        .iter()
        .map(|&(id, name, zip, latitude, longitude, timezone)| {
            let invalid = |err: &dyn std::fmt::Display| {
                Error::internal(format!("invalid sample user: {err}"))
            };
            let coordinates = Coordinates::new(latitude, longitude).map_err(|e| invalid(&e))?;
            let location = GeoLocation::new(coordinates, timezone).map_err(|e| invalid(&e))?;
            Ok(User::new(
                UserId::new(id).map_err(|e| invalid(&e))?,
                UserName::new(name).map_err(|e| invalid(&e))?,
                ZipCode::new(zip).map_err(|e| invalid(&e))?,
                location,
                now,
            ))
        })
        .collect()
}
