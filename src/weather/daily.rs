use super::error::WeatherError;
use super::types::*;
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::collections::HashSet;

/// Collapses a 3-hour forecast payload into at most `max_days` daily entries.
///
/// The first entry seen for each UTC calendar date is kept as that day's
/// reading; later entries for the same date are skipped. Iteration stops as
/// soon as `max_days` distinct dates have been collected.
pub fn reduce_to_daily(payload: Value, max_days: usize) -> Result<Vec<DailyForecast>, WeatherError> {
    let feed: Forecast3hFeed = serde_json::from_value(payload)?;

    let mut daily = Vec::with_capacity(max_days);
    let mut seen_dates = HashSet::new();

    for item in feed.list {
        if daily.len() >= max_days {
            break;
        }

        let date = entry_date(&item)?;
        if !seen_dates.insert(date) {
            continue;
        }

        let entry: Forecast3hItem = serde_json::from_value(item)?;
        daily.push(DailyForecast::from_item(date, entry)?);
    }

    Ok(daily)
}

fn entry_date(item: &Value) -> Result<NaiveDate, WeatherError> {
    let dt = item
        .get("dt")
        .and_then(Value::as_i64)
        .ok_or_else(|| WeatherError::MalformedResponse("forecast entry is missing `dt`".to_string()))?;

    DateTime::from_timestamp(dt, 0)
        .map(|ts| ts.date_naive())
        .ok_or_else(|| WeatherError::MalformedResponse(format!("forecast timestamp out of range: {}", dt)))
}

impl DailyForecast {
    fn from_item(date: NaiveDate, item: Forecast3hItem) -> Result<Self, WeatherError> {
        let condition = item.weather.into_iter().next().ok_or_else(|| {
            WeatherError::MalformedResponse(format!("forecast entry {} has no weather condition", item.dt))
        })?;

        Ok(Self {
            date,
            temp: item.main.temp,
            description: condition.description,
            icon: condition.icon,
            humidity: item.main.humidity,
            wind_speed: item.wind.speed,
        })
    }
}
