//! DTOs for decoding OpenWeather current-weather responses.
//!
//! Both adapters hit the same endpoint; each decodes only the fields it
//! needs and maps them into port types in one pass.

use serde::Deserialize;

use crate::domain::Coordinates;
use crate::domain::ports::{ProviderLocation, ProviderWeather};

#[derive(Debug, Deserialize)]
pub(super) struct CoordDto {
    pub(super) lat: f64,
    pub(super) lon: f64,
}

/// Subset used for postal-code lookups.
#[derive(Debug, Deserialize)]
pub(super) struct LocationResponseDto {
    pub(super) coord: CoordDto,
    /// Offset from UTC in seconds.
    pub(super) timezone: i32,
}

impl LocationResponseDto {
    pub(super) fn into_provider_location(self) -> Result<ProviderLocation, String> {
        let coordinates = Coordinates::new(self.coord.lat, self.coord.lon)
            .map_err(|err| format!("provider coordinates invalid: {err}"))?;
        Ok(ProviderLocation {
            coordinates,
            utc_offset_seconds: self.timezone,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MainDto {
    pub(super) temp: f64,
    pub(super) humidity: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct ConditionDto {
    pub(super) description: String,
    pub(super) icon: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WindDto {
    pub(super) speed: f64,
}

/// Subset used for weather lookups.
#[derive(Debug, Deserialize)]
pub(super) struct WeatherResponseDto {
    pub(super) main: MainDto,
    #[serde(default)]
    pub(super) weather: Vec<ConditionDto>,
    pub(super) wind: WindDto,
}

impl WeatherResponseDto {
    pub(super) fn into_provider_weather(self) -> Result<ProviderWeather, String> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| "response has no weather conditions".to_owned())?;
        Ok(ProviderWeather {
            temp: self.main.temp,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            description: condition.description,
            icon: condition.icon,
        })
    }
}
