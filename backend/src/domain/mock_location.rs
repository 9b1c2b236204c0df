//! Synthetic but plausible locations for when the geocoding provider is
//! unavailable or unconfigured.
//!
//! US postal codes map to a regional anchor by numeric ZIP band; other
//! countries map to a fixed anchor near their main city. Each result is the
//! anchor plus uniform jitter of `(r - 0.5) * spread` degrees per axis.

use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{CountryCode, Coordinates, GeoLocation, PostalCode};

/// Anchor point and jitter envelope for a synthetic location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockRegion {
    /// Anchor latitude.
    pub latitude: f64,
    /// Anchor longitude.
    pub longitude: f64,
    /// Full width of the jitter window in degrees.
    pub spread: f64,
    /// IANA zone reported for the region.
    pub timezone: &'static str,
}

const fn region(latitude: f64, longitude: f64, spread: f64, timezone: &'static str) -> MockRegion {
    MockRegion {
        latitude,
        longitude,
        spread,
        timezone,
    }
}

const HAWAII: MockRegion = region(21.3099, -157.8581, 0.5, "Pacific/Honolulu");
const ALASKA: MockRegion = region(61.2181, -149.9003, 2.0, "America/Anchorage");
const PACIFIC: MockRegion = region(37.7749, -122.4194, 8.0, "America/Los_Angeles");
const MOUNTAIN: MockRegion = region(39.7392, -104.9903, 6.0, "America/Denver");
const CENTRAL: MockRegion = region(32.7767, -96.797, 10.0, "America/Chicago");
const EASTERN: MockRegion = region(40.7128, -74.006, 8.0, "America/New_York");

const COUNTRY_SPREAD: f64 = 2.0;
const NEW_YORK: MockRegion = region(40.7128, -74.006, COUNTRY_SPREAD, "America/New_York");

/// Regional anchor for a US ZIP prefix. Bands are checked in order.
pub fn us_region(zip_prefix: Option<u32>) -> MockRegion {
    match zip_prefix {
        Some(96_701..=96_898) => HAWAII,
        Some(99_501..=99_950) => ALASKA,
        Some(90_001..=96_162 | 97_001..=99_401) => PACIFIC,
        Some(80_001..=89_999) => MOUNTAIN,
        Some(50_001..=79_999) => CENTRAL,
        _ => EASTERN,
    }
}

/// Anchor for a non-US country; unknown countries use New York.
pub fn country_region(country: &CountryCode) -> MockRegion {
    let (latitude, longitude, timezone) = match country.as_ref() {
        "BR" => (-23.5475, -46.6361, "America/Sao_Paulo"),
        "MX" => (19.4326, -99.1332, "America/Mexico_City"),
        "AR" => (-34.6037, -58.3816, "America/Argentina/Buenos_Aires"),
        "DE" => (52.52, 13.405, "Europe/Berlin"),
        "FR" => (48.8566, 2.3522, "Europe/Paris"),
        "GB" => (51.5074, -0.1278, "Europe/London"),
        "JP" => (35.6762, 139.6503, "Asia/Tokyo"),
        "IN" => (19.076, 72.8777, "Asia/Kolkata"),
        "AU" => (-33.8688, 151.2093, "Australia/Sydney"),
        "CA" => (43.6532, -79.3832, "America/Toronto"),
        _ => return NEW_YORK,
    };
    region(latitude, longitude, COUNTRY_SPREAD, timezone)
}

/// Produces jittered mock locations.
#[derive(Debug)]
pub struct MockLocationGenerator {
    rng: Mutex<SmallRng>,
}

impl Default for MockLocationGenerator {
    fn default() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }
}

impl MockLocationGenerator {
    /// Deterministic generator for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Synthesise a location for the postal code.
    ///
    /// # Examples
    /// ```
    /// use geodir_backend::domain::{CountryCode, MockLocationGenerator, PostalCode};
    ///
    /// let generator = MockLocationGenerator::seeded(7);
    /// let code = PostalCode::new("96815").expect("valid postal code");
    /// let location = generator.generate(&code, &CountryCode::default());
    /// assert_eq!(location.timezone(), "Pacific/Honolulu");
    /// ```
    pub fn generate(&self, postal_code: &PostalCode, country: &CountryCode) -> GeoLocation {
        let region = if country.is_us() {
            us_region(postal_code.numeric_prefix())
        } else {
            country_region(country)
        };
        self.jitter(region)
    }

    fn jitter(&self, region: MockRegion) -> GeoLocation {
        let (r_lat, r_lon) = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            (rng.r#gen::<f64>(), rng.r#gen::<f64>())
        };
        let coordinates = Coordinates::clamped(
            region.latitude + (r_lat - 0.5) * region.spread,
            region.longitude + (r_lon - 0.5) * region.spread,
        );
        GeoLocation::from_trusted(coordinates, region.timezone)
    }
}
