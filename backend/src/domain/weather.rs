//! Weather annotations shown alongside users. Never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinates, User};

/// Coarse weather category derived from a provider description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    /// Clear sky, and the fallback for unknown text.
    Sunny,
    /// Cloud or overcast.
    Cloudy,
    /// Rain or drizzle.
    Rainy,
    /// Snow or sleet.
    Snowy,
    /// Storm or thunder without rain.
    Stormy,
    /// Fog or mist.
    Foggy,
}

impl WeatherCondition {
    /// Classify a free-text description. Keyword groups are checked in a
    /// fixed order so "thunderstorm with rain" is rainy.
    ///
    /// # Examples
    /// ```
    /// use geodir_backend::domain::WeatherCondition;
    ///
    /// assert_eq!(WeatherCondition::classify("Light Drizzle"), WeatherCondition::Rainy);
    /// assert_eq!(WeatherCondition::classify("clear sky"), WeatherCondition::Sunny);
    /// ```
    pub fn classify(description: &str) -> Self {
        const RULES: [(&[&str], WeatherCondition); 5] = [
            (&["rain", "drizzle"], WeatherCondition::Rainy),
            (&["snow", "sleet"], WeatherCondition::Snowy),
            (&["storm", "thunder"], WeatherCondition::Stormy),
            (&["cloud", "overcast"], WeatherCondition::Cloudy),
            (&["fog", "mist"], WeatherCondition::Foggy),
        ];

        let lowered = description.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map_or(Self::Sunny, |(_, condition)| *condition)
    }
}

/// Current conditions at a coordinate, in imperial units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Temperature in °F.
    pub temp: f64,
    /// Provider text such as `light rain`.
    pub description: String,
    /// Provider icon code such as `01d`.
    pub icon: String,
    /// Relative humidity percentage.
    pub humidity: u32,
    /// Wind speed in mph.
    pub wind_speed: f64,
    /// Category derived from `description`.
    pub condition: WeatherCondition,
    /// When the reading was taken or generated.
    pub timestamp: DateTime<Utc>,
}

impl WeatherReport {
    /// Deterministic stand-in derived from the coordinates alone.
    ///
    /// With `seed = |lat + lon|`: temperature `45 + seed mod 50`, condition
    /// `⌊seed⌋ mod 4` over sunny/cloudy/rainy/snowy, humidity
    /// `40 + ⌊2·seed⌋ mod 40` and wind `5 + ⌊3·seed⌋ mod 15`.
    pub fn mock(coordinates: Coordinates, timestamp: DateTime<Utc>) -> Self {
        const VARIANTS: [(WeatherCondition, &str, &str); 4] = [
            (WeatherCondition::Sunny, "Clear sky", "01d"),
            (WeatherCondition::Cloudy, "Partly cloudy", "02d"),
            (WeatherCondition::Rainy, "Light rain", "10d"),
            (WeatherCondition::Snowy, "Light snow", "13d"),
        ];

        let seed = (coordinates.latitude() + coordinates.longitude()).abs();
        let (condition, description, icon) = VARIANTS[floor_mod(seed, 4) as usize];

        Self {
            temp: 45.0 + seed % 50.0,
            description: description.to_owned(),
            icon: icon.to_owned(),
            humidity: 40 + floor_mod(seed * 2.0, 40),
            wind_speed: f64::from(5 + floor_mod(seed * 3.0, 15)),
            condition,
            timestamp,
        }
    }
}

/// `⌊value⌋ mod modulus` for a non-negative, finite `value`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is a non-negative coordinate sum far below u64::MAX"
)]
fn floor_mod(value: f64, modulus: u32) -> u32 {
    let floored = value.floor() as u64;
    // The remainder is always below `modulus`, so it fits back into u32.
    u32::try_from(floored % u64::from(modulus)).unwrap_or(0)
}

/// A user decorated with current weather for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithWeather {
    /// The directory entry, flattened into the JSON object.
    #[serde(flatten)]
    pub user: User,
    /// Absent when no reading could be produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReport>,
}
