use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Longest cache lifetime accepted from the environment (30 days).
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 3600;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub openweather_current_path: String,
    pub openweather_forecast_path: String,
    pub openweather_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_max_capacity: u64,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source, so tests don't
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cache_ttl_secs = parse_or(&lookup, "WEATHER_CACHE_TTL_SECS", 30 * 60)?;
        if cache_ttl_secs > MAX_CACHE_TTL_SECS {
            anyhow::bail!(
                "WEATHER_CACHE_TTL_SECS must be at most {} seconds, got {}",
                MAX_CACHE_TTL_SECS,
                cache_ttl_secs
            );
        }

        Ok(Config {
            openweather_api_key: lookup("OPENWEATHER_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("OPENWEATHER_API_KEY not set"))?,
            openweather_base_url: string_or("OPENWEATHER_BASE_URL", "https://api.openweathermap.org"),
            openweather_current_path: string_or("OPENWEATHER_CURRENT_PATH", "/data/2.5/weather"),
            openweather_forecast_path: string_or("OPENWEATHER_FORECAST_PATH", "/data/2.5/forecast"),
            openweather_timeout_secs: parse_or(&lookup, "OPENWEATHER_TIMEOUT_SECS", 30)?,
            cache_ttl_secs,
            cache_max_capacity: parse_or(&lookup, "WEATHER_CACHE_MAX_CAPACITY", 1000)?,
            bind_addr: string_or("BIND_ADDR", "0.0.0.0:8080"),
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.openweather_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} is invalid ({}): {}", key, raw, e)),
        None => Ok(default),
    }
}
