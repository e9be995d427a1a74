use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Provider answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::MalformedResponse(err.to_string())
    }
}
