use super::cache::{CachedWeather, WeatherCache};
use super::error::WeatherError;
use super::openweather::WeatherProvider;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Timelike, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted provider that counts how often each endpoint is hit.
pub struct MockWeatherProvider {
    current: Value,
    forecast: Value,
    failure: Option<(u16, String)>,
    current_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        let start = DateTime::from_timestamp(1_709_251_200, 0).unwrap_or_default();
        Self::with_payloads(mock_current_payload("London"), mock_forecast_payload(start, 40))
    }

    pub fn with_payloads(current: Value, forecast: Value) -> Self {
        Self {
            current,
            forecast,
            failure: None,
            current_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails with the given provider status and message.
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            failure: Some((status, message.to_string())),
            ..Self::new()
        }
    }

    pub fn current_calls(&self) -> usize {
        self.current_calls.load(Ordering::SeqCst)
    }

    pub fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    fn respond(&self, payload: &Value) -> Result<Value, WeatherError> {
        match &self.failure {
            Some((status, message)) => Err(WeatherError::Upstream {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(payload.clone()),
        }
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn current_weather(&self, _city: &str) -> Result<Value, WeatherError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(&self.current)
    }

    async fn forecast(&self, _city: &str) -> Result<Value, WeatherError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(&self.forecast)
    }
}

/// HashMap-backed cache that records every access and ignores expiry.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, CachedWeather>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl RecordingCache {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().map(|e| e.contains_key(key)).unwrap_or(false)
    }
}

#[async_trait]
impl WeatherCache for RecordingCache {
    async fn get(&self, key: &str) -> Option<CachedWeather> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().ok()?.get(key).cloned()
    }

    async fn set(&self, key: String, value: CachedWeather, _ttl: std::time::Duration) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, value);
        }
    }
}

pub fn mock_current_payload(city: &str) -> Value {
    json!({
        "name": city,
        "main": { "temp": 14.3, "feels_like": 13.1, "humidity": 72 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "wind": { "speed": 5.1, "deg": 240 },
        "cod": 200
    })
}

/// Generates `count` forecast entries three hours apart starting at `start`.
pub fn mock_forecast_payload(start: DateTime<Utc>, count: i64) -> Value {
    let list: Vec<Value> = (0..count)
        .map(|i| {
            let hours_ahead = i * 3;
            let target_time = start + Duration::hours(hours_ahead);
            let temp = 10.0 + hours_ahead as f64 * 0.5;
            let rainy = hours_ahead % 24 == 0;
            let (id, main, description) = if rainy {
                (500, "Rain", "light rain")
            } else {
                (800, "Clear", "clear sky")
            };
            let icon = if (6..18).contains(&target_time.hour()) { "01d" } else { "01n" };

            json!({
                "dt": target_time.timestamp(),
                "main": {
                    "temp": temp,
                    "feels_like": temp - 1.0,
                    "humidity": 60 + (i % 30),
                    "pressure": 1013
                },
                "weather": [{ "id": id, "main": main, "description": description, "icon": icon }],
                "wind": { "speed": 2.0 + i as f64 * 0.1, "deg": 180 },
                "dt_txt": target_time.format("%Y-%m-%d %H:%M:%S").to_string()
            })
        })
        .collect();

    json!({
        "cod": "200",
        "message": 0,
        "cnt": list.len(),
        "list": list,
        "city": { "name": "London", "country": "GB", "timezone": 0 }
    })
}
