use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// One representative reading per calendar day, as served by the forecast endpoint.
///
/// Numeric readings keep the provider's JSON representation, so an integer
/// humidity of `60` is served back as `60`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp: Number,
    pub description: String,
    pub icon: String,
    pub humidity: Number,
    pub wind_speed: Number,
}

// Items stay untyped until the reduction decides to keep them; entries that
// are skipped are never validated past their timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast3hFeed {
    pub list: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast3hItem {
    pub dt: i64,
    pub main: Forecast3hMain,
    pub weather: Vec<Forecast3hWeather>,
    pub wind: Forecast3hWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast3hMain {
    pub temp: Number,
    pub humidity: Number,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast3hWeather {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast3hWind {
    pub speed: Number,
}
