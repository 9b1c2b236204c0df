//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, SubsecRound, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Coordinates, GeoLocation};

/// Validation errors raised while building user components.
///
/// The `Display` output is the client-facing message; [`Self::field`] names
/// the offending JSON field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Id is blank.
    EmptyId,
    /// Id is not a canonical UUID.
    InvalidId,
    /// Name is missing or blank.
    EmptyName,
    /// Trimmed name is shorter than `min`.
    NameTooShort { min: usize },
    /// Trimmed name exceeds `max`.
    NameTooLong { max: usize },
    /// Name contains something other than letters, spaces, hyphens or apostrophes.
    NameInvalidCharacters,
    /// Zip code is missing or blank.
    EmptyZipCode,
    /// Zip code is not `12345` or `12345-6789`.
    InvalidZipCode,
    /// Stored coordinates or timezone are not valid.
    InvalidLocation { message: String },
}

impl UserValidationError {
    /// JSON field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyName
            | Self::NameTooShort { .. }
            | Self::NameTooLong { .. }
            | Self::NameInvalidCharacters => "name",
            Self::EmptyZipCode | Self::InvalidZipCode => "zipCode",
            Self::InvalidLocation { .. } => "location",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "Name is required"),
            Self::NameTooShort { min } => {
                write!(f, "Name must be at least {min} characters long")
            }
            Self::NameTooLong { max } => {
                write!(f, "Name must be less than {max} characters long")
            }
            Self::NameInvalidCharacters => write!(
                f,
                "Name can only contain letters, spaces, hyphens, and apostrophes",
            ),
            Self::EmptyZipCode => write!(f, "Zip code is required"),
            Self::InvalidZipCode => write!(f, "Zip code must be in format 12345 or 12345-6789"),
            Self::InvalidLocation { message } => write!(f, "invalid location: {message}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum allowed length for a user name.
pub const USER_NAME_MIN: usize = 2;
/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 100;

static USER_NAME_RE: OnceLock<Regex> = OnceLock::new();
static ZIP_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn user_name_regex() -> &'static Regex {
    USER_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[A-Za-z\s\-']+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("user name regex failed to compile: {error}"))
    })
}

fn zip_code_regex() -> &'static Regex {
    ZIP_CODE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{5}(-[0-9]{4})?$")
            .unwrap_or_else(|error| panic!("zip code regex failed to compile: {error}"))
    })
}

/// Person's name, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    ///
    /// # Examples
    /// ```
    /// use geodir_backend::domain::UserName;
    ///
    /// assert_eq!(UserName::new("  Mary-Jane O'Neil ").expect("valid").as_ref(), "Mary-Jane O'Neil");
    /// assert!(UserName::new("A").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let trimmed = name.trim();

        let length = trimmed.chars().count();
        if length < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort {
                min: USER_NAME_MIN,
            });
        }
        if length > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: USER_NAME_MAX });
        }
        if !user_name_regex().is_match(trimmed) {
            return Err(UserValidationError::NameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// US ZIP or ZIP+4 code, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    /// Validate and construct a [`ZipCode`].
    pub fn new(zip_code: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(zip_code.into())
    }

    fn from_owned(zip_code: String) -> Result<Self, UserValidationError> {
        if zip_code.is_empty() {
            return Err(UserValidationError::EmptyZipCode);
        }
        let trimmed = zip_code.trim();
        if !zip_code_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidZipCode);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ZipCode> for String {
    fn from(value: ZipCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for ZipCode {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Directory entry for a person.
///
/// ## Invariants
/// - `location` was resolved from the current `zip_code` (possibly as mock
///   data).
/// - `updated_at >= created_at` for records produced by the user service.
/// - Timestamps set through [`User::new`] and [`User::touch`] carry at most
///   microsecond precision, matching PostgreSQL `TIMESTAMPTZ`.
///
/// Serialises as a flat camelCase object:
/// `{id, name, zipCode, latitude, longitude, timezone, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: UserName,
    zip_code: ZipCode,
    location: GeoLocation,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly created user; both timestamps equal `created_at`.
    pub fn new(
        id: UserId,
        name: UserName,
        zip_code: ZipCode,
        location: GeoLocation,
        created_at: DateTime<Utc>,
    ) -> Self {
        let created_at = storage_precision(created_at);
        Self {
            id,
            name,
            zip_code,
            location,
            created_at,
            updated_at: created_at,
        }
    }

    /// Rehydrate a stored user with both timestamps supplied.
    pub fn from_parts(
        id: UserId,
        name: UserName,
        zip_code: ZipCode,
        location: GeoLocation,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            zip_code,
            location,
            created_at,
            updated_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Validated name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Postal code the location was resolved from.
    pub fn zip_code(&self) -> &ZipCode {
        &self.zip_code
    }

    /// Resolved location.
    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the name.
    pub fn rename(&mut self, name: UserName) {
        self.name = name;
    }

    /// Move the user to a new zip code with its resolved location.
    pub fn relocate(&mut self, zip_code: ZipCode, location: GeoLocation) {
        self.zip_code = zip_code;
        self.location = location;
    }

    /// Record a modification time.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = storage_precision(at);
    }
}

fn storage_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    zip_code: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            zip_code,
            location,
            created_at,
            updated_at,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            zip_code: zip_code.into(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            timezone: location.timezone().to_owned(),
            created_at,
            updated_at,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let invalid_location = |err: super::GeoValidationError| {
            UserValidationError::InvalidLocation {
                message: err.to_string(),
            }
        };
        let coordinates =
            Coordinates::new(value.latitude, value.longitude).map_err(invalid_location)?;
        let location = GeoLocation::new(coordinates, value.timezone).map_err(invalid_location)?;

        Ok(Self::from_parts(
            UserId::new(value.id)?,
            UserName::new(value.name)?,
            ZipCode::new(value.zip_code)?,
            location,
            value.created_at,
            value.updated_at,
        ))
    }
}
