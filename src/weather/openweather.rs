use super::error::WeatherError;
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const CURRENT_FALLBACK_MESSAGE: &str = "Failed to fetch weather data";
const FORECAST_FALLBACK_MESSAGE: &str = "Failed to fetch forecast data";

/// Remote source of weather payloads, queried by city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions, returned exactly as the provider sent them.
    async fn current_weather(&self, city: &str) -> Result<Value, WeatherError>;

    /// Raw multi-day forecast in 3-hour steps.
    async fn forecast(&self, city: &str) -> Result<Value, WeatherError>;
}

pub struct OpenWeatherClient {
    client: Client,
    config: Config,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(concat!("WeatherProxy/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    async fn fetch(&self, path: &str, city: &str, fallback: &str) -> Result<Value, WeatherError> {
        let url = format!("{}{}", self.config.openweather_base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.openweather_api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                city = %city,
                "OpenWeatherMap API error"
            );

            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<Value, WeatherError> {
        self.fetch(&self.config.openweather_current_path, city, CURRENT_FALLBACK_MESSAGE)
            .await
    }

    async fn forecast(&self, city: &str) -> Result<Value, WeatherError> {
        self.fetch(&self.config.openweather_forecast_path, city, FORECAST_FALLBACK_MESSAGE)
            .await
    }
}

/// Pulls the `message` field out of a provider error body, if there is one.
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
