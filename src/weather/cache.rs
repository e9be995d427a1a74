use super::types::DailyForecast;
use async_trait::async_trait;
use moka::future::Cache;
use serde_json::Value;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
pub enum CachedWeather {
    Current(Value),
    Forecast(Vec<DailyForecast>),
}

/// Key-value store with per-entry expiry, shared by every request.
#[async_trait]
pub trait WeatherCache: Send + Sync {
    /// Returns the stored value if present and not yet expired.
    async fn get(&self, key: &str) -> Option<CachedWeather>;

    async fn set(&self, key: String, value: CachedWeather, ttl: Duration);
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: CachedWeather,
    expires_at: Instant,
}

/// In-process cache backed by moka.
///
/// moka enforces capacity and an upper bound on lifetime; the per-entry
/// deadline is checked on read so callers can pass their own TTL.
pub struct MokaWeatherCache {
    cache: Cache<String, CacheEntry>,
}

impl MokaWeatherCache {
    pub fn new(max_capacity: u64, max_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(max_ttl)
            .build();

        Self { cache }
    }
}

#[async_trait]
impl WeatherCache for MokaWeatherCache {
    async fn get(&self, key: &str) -> Option<CachedWeather> {
        let entry = self.cache.get(key).await?;

        if Instant::now() >= entry.expires_at {
            self.cache.invalidate(key).await;
            return None;
        }

        Some(entry.value)
    }

    async fn set(&self, key: String, value: CachedWeather, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        self.cache.insert(key, entry).await;
    }
}
