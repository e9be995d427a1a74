use super::cache::{CachedWeather, WeatherCache};
use super::daily::reduce_to_daily;
use super::error::WeatherError;
use super::openweather::WeatherProvider;
use super::types::DailyForecast;
use super::{current_cache_key, forecast_cache_key, FORECAST_DAYS};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Serves weather lookups from the cache, falling back to the provider on a miss.
///
/// Only successful results are stored, so a failed lookup is retried upstream
/// on the next request.
pub struct WeatherGateway {
    provider: Arc<dyn WeatherProvider>,
    cache: Arc<dyn WeatherCache>,
    ttl: Duration,
}

impl WeatherGateway {
    pub fn new(provider: Arc<dyn WeatherProvider>, cache: Arc<dyn WeatherCache>, ttl: Duration) -> Self {
        Self { provider, cache, ttl }
    }

    pub async fn current_weather(&self, city: &str) -> Result<Value, WeatherError> {
        let key = current_cache_key(city);

        if let Some(CachedWeather::Current(payload)) = self.cache.get(&key).await {
            tracing::debug!(city = %city, "current weather cache hit");
            return Ok(payload);
        }

        tracing::debug!(city = %city, "current weather cache miss");
        let payload = self.provider.current_weather(city).await?;

        self.cache
            .set(key, CachedWeather::Current(payload.clone()), self.ttl)
            .await;

        Ok(payload)
    }

    pub async fn forecast(&self, city: &str) -> Result<Vec<DailyForecast>, WeatherError> {
        let key = forecast_cache_key(city);

        if let Some(CachedWeather::Forecast(daily)) = self.cache.get(&key).await {
            tracing::debug!(city = %city, "forecast cache hit");
            return Ok(daily);
        }

        tracing::debug!(city = %city, "forecast cache miss");
        let payload = self.provider.forecast(city).await?;
        let daily = reduce_to_daily(payload, FORECAST_DAYS)?;

        self.cache
            .set(key, CachedWeather::Forecast(daily.clone()), self.ttl)
            .await;

        Ok(daily)
    }
}
