//! Mapping from provider coordinates and UTC offsets to timezone labels.
//!
//! The weather provider reports only a UTC offset in seconds, so zone names
//! are inferred. Resolution order:
//!
//! 1. US longitude boxes (first match wins on shared edges);
//! 2. per-country longitude tables for countries with known zone splits;
//! 3. the whole-hour offset table;
//! 4. a `UTC±HH:MM` literal.

use super::CountryCode;

const SECONDS_PER_HOUR: i32 = 3_600;
const SECONDS_PER_MINUTE: i32 = 60;

/// Inclusive US longitude boxes, checked in order.
const US_LONGITUDE_BOXES: [(f64, f64, &str); 4] = [
    (-125.0, -114.0, "America/Los_Angeles"),
    (-114.0, -104.0, "America/Denver"),
    (-104.0, -87.0, "America/Chicago"),
    (-87.0, -67.0, "America/New_York"),
];

/// Pick a timezone label for a provider-resolved location.
///
/// # Examples
/// ```
/// use geodir_backend::domain::{CountryCode, resolve_timezone};
///
/// let us = CountryCode::default();
/// assert_eq!(resolve_timezone(&us, -118.24, -25_200), "America/Los_Angeles");
/// assert_eq!(resolve_timezone(&us, 0.0, 19_800), "UTC+05:30");
/// ```
pub fn resolve_timezone(country: &CountryCode, longitude: f64, offset_seconds: i32) -> String {
    let by_longitude = if country.is_us() {
        us_zone_for_longitude(longitude)
    } else {
        country_zone_for_longitude(country, longitude)
    };
    by_longitude
        .or_else(|| zone_for_offset(offset_seconds))
        .map_or_else(|| format_utc_offset(offset_seconds), str::to_owned)
}

fn us_zone_for_longitude(longitude: f64) -> Option<&'static str> {
    US_LONGITUDE_BOXES
        .iter()
        .find(|(west, east, _)| (*west..=*east).contains(&longitude))
        .map(|(_, _, zone)| *zone)
}

fn country_zone_for_longitude(country: &CountryCode, longitude: f64) -> Option<&'static str> {
    let zone = match country.as_ref() {
        "BR" => {
            if longitude > -41.0 {
                "America/Fortaleza"
            } else if longitude > -52.0 {
                "America/Sao_Paulo"
            } else if longitude > -68.0 {
                "America/Cuiaba"
            } else {
                "America/Rio_Branco"
            }
        }
        "MX" => {
            if longitude > -90.0 {
                "America/Cancun"
            } else if longitude > -103.0 {
                "America/Mexico_City"
            } else if longitude > -108.0 {
                "America/Mazatlan"
            } else {
                "America/Tijuana"
            }
        }
        "AR" => "America/Argentina/Buenos_Aires",
        "DE" => "Europe/Berlin",
        "FR" => "Europe/Paris",
        _ => return None,
    };
    Some(zone)
}

/// Zone for a whole-hour offset in the table; fractional offsets never match.
fn zone_for_offset(offset_seconds: i32) -> Option<&'static str> {
    if offset_seconds % SECONDS_PER_HOUR != 0 {
        return None;
    }
    match offset_seconds / SECONDS_PER_HOUR {
        -10 => Some("Pacific/Honolulu"),
        -9 => Some("America/Anchorage"),
        -8 => Some("America/Los_Angeles"),
        -7 => Some("America/Denver"),
        -6 => Some("America/Chicago"),
        -5 => Some("America/New_York"),
        -4 => Some("America/Caracas"),
        _ => None,
    }
}

/// Render an offset as `UTC±HH:MM`. Zero renders as `UTC+00:00`.
pub fn format_utc_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let total = offset_seconds.unsigned_abs();
    let hours = total / SECONDS_PER_HOUR.unsigned_abs();
    let minutes = (total % SECONDS_PER_HOUR.unsigned_abs()) / SECONDS_PER_MINUTE.unsigned_abs();
    format!("UTC{sign}{hours:02}:{minutes:02}")
}
