use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::weather::{error::WeatherError, gateway::WeatherGateway, types::DailyForecast};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<WeatherGateway>,
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// Extracts a non-blank `city`, turning malformed query strings into the
/// same JSON validation error as a missing parameter.
fn require_city(query: Result<Query<CityQuery>, QueryRejection>) -> Result<String, ApiError> {
    let Query(params) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;

    params
        .city
        .filter(|city| !city.trim().is_empty())
        .ok_or_else(|| ApiError::validation("The city field is required."))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by every API handler, rendered as `{ "error": "..." }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl From<WeatherError> for ApiError {
    // Upstream, malformed and transport failures all surface as 500.
    // Upstream rejections are already logged by the provider client.
    fn from(err: WeatherError) -> Self {
        if !matches!(err, WeatherError::Upstream { .. }) {
            tracing::error!("Weather lookup failed: {}", err);
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

// Route handlers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn current_weather(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let city = require_city(query)?;

    let payload = state.gateway.current_weather(&city).await?;
    Ok(Json(payload))
}

pub async fn forecast(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Vec<DailyForecast>>, ApiError> {
    let city = require_city(query)?;

    let daily = state.gateway.forecast(&city).await?;
    Ok(Json(daily))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/weather/current", get(current_weather))
        .route("/api/weather/forecast", get(forecast))
        .with_state(state)
}
