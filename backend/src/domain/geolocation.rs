//! Geolocation value types.
//!
//! A [`GeoLocation`] is the resolved position and timezone attached to a user
//! record. [`PostalCode`] and [`CountryCode`] are the resolver inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Country assumed when callers omit one.
pub const DEFAULT_COUNTRY: &str = "US";

/// Minimum accepted postal code length.
pub const POSTAL_CODE_MIN: usize = 3;
/// Maximum accepted postal code length.
pub const POSTAL_CODE_MAX: usize = 10;

/// Validation errors for geolocation inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoValidationError {
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("latitude must be between -90 and 90, got {value}")]
    LatitudeOutOfRange {
        /// Offending value.
        value: f64,
    },
    /// Longitude outside `[-180, 180]` or not finite.
    #[error("longitude must be between -180 and 180, got {value}")]
    LongitudeOutOfRange {
        /// Offending value.
        value: f64,
    },
    /// Postal code was blank.
    #[error("postal code is required")]
    EmptyPostalCode,
    /// Postal code length or characters are not acceptable.
    #[error(
        "postal code must be {POSTAL_CODE_MIN}-{POSTAL_CODE_MAX} letters, digits, spaces or hyphens"
    )]
    InvalidPostalCode,
    /// Country code is not two ASCII letters.
    #[error("country code must be a two-letter ISO 3166-1 alpha-2 code")]
    InvalidCountryCode,
    /// Timezone label was blank.
    #[error("timezone must not be empty")]
    EmptyTimezone,
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and construct a coordinate pair.
    ///
    /// # Errors
    /// Returns an out-of-range error for non-finite or out-of-bounds values.
    ///
    /// # Examples
    /// ```
    /// use geodir_backend::domain::Coordinates;
    ///
    /// let nyc = Coordinates::new(40.7128, -74.006).expect("valid coordinates");
    /// assert_eq!(nyc.latitude(), 40.7128);
    /// assert!(Coordinates::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoValidationError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build coordinates, clamping into the valid range.
    ///
    /// Used for synthetic positions whose jitter may overshoot a pole or the
    /// antimeridian.
    pub(crate) fn clamped(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Resolved location for a postal code.
///
/// `timezone` is either an IANA zone name or a `UTC±HH:MM` literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
    timezone: String,
}

impl GeoLocation {
    /// Build a location from validated coordinates and a timezone label.
    ///
    /// # Errors
    /// Returns [`GeoValidationError::EmptyTimezone`] for blank labels.
    pub fn new(
        coordinates: Coordinates,
        timezone: impl Into<String>,
    ) -> Result<Self, GeoValidationError> {
        let timezone = timezone.into();
        if timezone.trim().is_empty() {
            return Err(GeoValidationError::EmptyTimezone);
        }
        Ok(Self {
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            timezone,
        })
    }

    /// Build from a zone label known to be non-empty.
    pub(crate) fn from_trusted(coordinates: Coordinates, timezone: &str) -> Self {
        Self {
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            timezone: timezone.to_owned(),
        }
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// IANA zone or `UTC±HH:MM` literal.
    pub fn timezone(&self) -> &str {
        self.timezone.as_str()
    }

    /// Coordinates of this location.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Postal code accepted by the resolver.
///
/// Looser than a US ZIP code: 3-10 characters of ASCII letters, digits,
/// spaces or hyphens after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate and construct a postal code.
    ///
    /// # Errors
    /// Returns a validation error for blank or malformed input.
    pub fn new(value: impl Into<String>) -> Result<Self, GeoValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(GeoValidationError::EmptyPostalCode);
        }
        let length = trimmed.chars().count();
        let allowed = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-');
        if !(POSTAL_CODE_MIN..=POSTAL_CODE_MAX).contains(&length) || !allowed {
            return Err(GeoValidationError::InvalidPostalCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Leading numeric prefix of the first five characters, if any.
    ///
    /// `"10001-1234"` yields `10001`; `"1234A"` yields `1234`; `"ABCDE"`
    /// yields `None`.
    pub fn numeric_prefix(&self) -> Option<u32> {
        let digits: String = self
            .0
            .chars()
            .take(5)
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PostalCode> for String {
    fn from(value: PostalCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostalCode {
    type Error = GeoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Upper-cased ISO 3166-1 alpha-2 country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and normalise a country code.
    ///
    /// # Errors
    /// Returns [`GeoValidationError::InvalidCountryCode`] unless the trimmed
    /// input is exactly two ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use geodir_backend::domain::CountryCode;
    ///
    /// assert_eq!(CountryCode::new(" br ").expect("valid").as_ref(), "BR");
    /// assert!(CountryCode::new("USA").is_err());
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, GeoValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GeoValidationError::InvalidCountryCode);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Whether this is the United States.
    pub fn is_us(&self) -> bool {
        self.0 == DEFAULT_COUNTRY
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self(DEFAULT_COUNTRY.to_owned())
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = GeoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
