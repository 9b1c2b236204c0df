//! In-process TTL cache for provider-resolved locations.
//!
//! Entries expire `ttl` after insertion as measured by the injected
//! [`Clock`]. Expired entries are dropped when read and swept on every
//! insertion, so keys that are never queried again do not accumulate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tokio::sync::RwLock;

use crate::domain::GeoLocation;
use crate::domain::ports::{GeoLocationCache, GeoLocationCacheKey};

struct Entry {
    location: GeoLocation,
    expires_at: DateTime<Utc>,
}

/// [`GeoLocationCache`] held in memory for the process lifetime.
pub struct InMemoryGeoLocationCache {
    entries: RwLock<HashMap<GeoLocationCacheKey, Entry>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl InMemoryGeoLocationCache {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }
}

#[async_trait]
impl GeoLocationCache for InMemoryGeoLocationCache {
    async fn get(&self, key: &GeoLocationCacheKey) -> Option<GeoLocation> {
        let now = self.clock.utc();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.expires_at > now => return Some(entry.location.clone()),
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        None
    }

    async fn put(&self, key: GeoLocationCacheKey, location: GeoLocation) {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key, Entry { location, expires_at });
    }
}
