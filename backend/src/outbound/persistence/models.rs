//! Internal Diesel row structs for the `users` table.
//!
//! Never exposed outside the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;
use crate::domain::{Coordinates, GeoLocation, User, UserId, UserName, ZipCode};

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Rebuild the domain user, re-running value validation.
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let name = UserName::new(self.name).map_err(|err| err.to_string())?;
        let zip_code = ZipCode::new(self.zip_code).map_err(|err| err.to_string())?;
        let coordinates =
            Coordinates::new(self.latitude, self.longitude).map_err(|err| err.to_string())?;
        let location = GeoLocation::new(coordinates, self.timezone).map_err(|err| err.to_string())?;
        Ok(User::from_parts(
            UserId::from_uuid(self.id),
            name,
            zip_code,
            location,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Full row written on insert and on conflict update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserRecord<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub zip_code: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for UserRecord<'a> {
    fn from(user: &'a User) -> Self {
        let location = user.location();
        Self {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            zip_code: user.zip_code().as_ref(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            timezone: location.timezone(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn row(name: &str, latitude: f64) -> UserRow {
        let at = Utc
            .with_ymd_and_hms(2025, 3, 3, 3, 3, 3)
            .single()
            .expect("timestamp");
        UserRow {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            zip_code: "10001".to_owned(),
            latitude,
            longitude: -74.0,
            timezone: "America/New_York".to_owned(),
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn valid_row_round_trips_through_record() {
        let user = row("Grace Hopper", 40.7).into_domain().expect("valid row");
        let record = UserRecord::from(&user);
        assert_eq!(record.name, "Grace Hopper");
        assert_eq!(record.latitude, 40.7);
        assert_eq!(record.id, *user.id().as_uuid());
    }

    #[rstest]
    #[case::bad_name("X", 40.0)]
    #[case::bad_latitude("Grace Hopper", 123.0)]
    fn corrupt_rows_are_rejected(#[case] name: &str, #[case] latitude: f64) {
        assert!(row(name, latitude).into_domain().is_err());
    }
}
