//! Core data models for the weather dashboard
//!
//! This module holds the typed forms of the three upstream payloads (place
//! search, forecast, PV series) and the clients that fetch them.

pub mod forecast;
pub mod geocoding;
pub mod pvgis;

#[cfg(test)]
pub(crate) mod test_server;

pub use forecast::{ForecastClient, ForecastError};
pub use geocoding::{GeocodingClient, GeocodingError, PlaceCandidate};
pub use pvgis::{PvSeries, PvgisClient, PvgisError};

use chrono::{NaiveDate, NaiveDateTime};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place the forecast is shown for
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Display label, e.g. "Germignac, Nouvelle-Aquitaine (FR)"
    pub label: String,
    pub coordinates: Coordinates,
}

/// Conditions at the time of the latest observation
///
/// Every field is optional: the forecast API may omit the `current` section
/// or individual variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentObservation {
    pub time: Option<NaiveDateTime>,
    /// Temperature in Celsius
    pub temperature_2m: Option<f64>,
    /// Feels-like temperature in Celsius
    pub apparent_temperature: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: Option<f64>,
    /// Mean sea level pressure in hPa
    pub pressure_msl: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed_10m: Option<f64>,
    /// Wind gusts in km/h
    pub wind_gusts_10m: Option<f64>,
    /// Wind direction in degrees
    pub wind_direction_10m: Option<f64>,
}

/// Hourly forecast variables, index-aligned to `time`.
///
/// Each variable array is either exactly as long as `time` or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    /// Local times in the forecast's timezone
    pub time: Vec<NaiveDateTime>,
    pub temperature_2m: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub dew_point_2m: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub cloud_cover: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub wind_gusts_10m: Vec<Option<f64>>,
    pub wind_direction_10m: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

/// Daily forecast variables, index-aligned to `time`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<Option<u8>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub uv_index_max: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// One calendar day of the daily forecast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub weather_code: Option<u8>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    /// Precipitation sum in mm
    pub precipitation_sum: Option<f64>,
    pub uv_index_max: Option<f64>,
    /// Maximum wind speed in km/h
    pub wind_speed_max: Option<f64>,
}

/// Reads `values[index]`, flattening both a short array and a null sample
pub(crate) fn sample<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}

impl DailySeries {
    /// Summary for the day at `index`, or `None` past the end of `time`
    pub fn summary(&self, index: usize) -> Option<DailySummary> {
        let date = *self.time.get(index)?;
        Some(DailySummary {
            date,
            weather_code: sample(&self.weather_code, index),
            temperature_max: sample(&self.temperature_2m_max, index),
            temperature_min: sample(&self.temperature_2m_min, index),
            precipitation_sum: sample(&self.precipitation_sum, index),
            uv_index_max: sample(&self.uv_index_max, index),
            wind_speed_max: sample(&self.wind_speed_10m_max, index),
        })
    }

    /// One summary per day in `time`
    pub fn summaries(&self) -> Vec<DailySummary> {
        (0..self.time.len()).filter_map(|i| self.summary(i)).collect()
    }
}

/// Everything one forecast request returns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastPayload {
    pub current: CurrentObservation,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}
