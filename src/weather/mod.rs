pub mod cache;
pub mod daily;
pub mod error;
pub mod gateway;
#[cfg(test)]
pub mod mock;
pub mod openweather;
pub mod types;

/// Number of distinct days kept by the daily forecast reduction.
pub const FORECAST_DAYS: usize = 5;

pub fn current_cache_key(city: &str) -> String {
    format!("current:{}", city)
}

pub fn forecast_cache_key(city: &str) -> String {
    format!("forecast:{}", city)
}
