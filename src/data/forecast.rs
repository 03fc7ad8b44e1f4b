//! Open-Meteo forecast API client
//!
//! This module fetches current, hourly and daily forecast data from the
//! Open-Meteo API and normalizes it into a [`ForecastPayload`]. Missing
//! sections and misaligned arrays become empty series instead of errors.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info};

use super::{Coordinates, CurrentObservation, DailySeries, ForecastPayload, HourlySeries};

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Timezone the forecast is requested in unless configured otherwise
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

const CURRENT_VARIABLES: &str = "temperature_2m,apparent_temperature,precipitation,cloud_cover,pressure_msl,wind_speed_10m,wind_gusts_10m,wind_direction_10m";

const HOURLY_VARIABLES: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,dew_point_2m,precipitation_probability,precipitation,cloud_cover,wind_speed_10m,wind_gusts_10m,wind_direction_10m,uv_index";

const DAILY_VARIABLES: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,uv_index_max,wind_speed_10m_max";

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    timezone: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    /// Create a new ForecastClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: OPEN_METEO_BASE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    /// Create a new ForecastClient against a different endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new()
        }
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the timezone hourly and daily times are expressed in
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Fetch the forecast for the given coordinates
    ///
    /// # Returns
    /// * `Ok(ForecastPayload)` - Normalized forecast; absent sections are empty
    /// * `Err(ForecastError)` - If the request, status or parsing fails
    pub async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
    ) -> Result<ForecastPayload, ForecastError> {
        debug!(
            lat = coordinates.latitude,
            lon = coordinates.longitude,
            "requesting forecast"
        );
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("timezone", self.timezone.clone()),
                ("current", CURRENT_VARIABLES.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let payload = parse_forecast(&text)?;
        info!(
            hours = payload.hourly.time.len(),
            days = payload.daily.time.len(),
            "forecast received"
        );
        Ok(payload)
    }
}

/// Parses a forecast response body into a normalized payload
pub fn parse_forecast(body: &str) -> Result<ForecastPayload, ForecastError> {
    let raw: OpenMeteoResponse = serde_json::from_str(body)?;
    Ok(ForecastPayload {
        current: raw.current.map(RawCurrent::into_observation).unwrap_or_default(),
        hourly: match raw.hourly {
            Some(hourly) => hourly.into_series()?,
            None => HourlySeries::default(),
        },
        daily: match raw.daily {
            Some(daily) => daily.into_series()?,
            None => DailySeries::default(),
        },
    })
}

/// Parse an ISO 8601 local datetime (e.g., "2024-07-15T05:30")
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| ForecastError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Parse an ISO 8601 date (e.g., "2024-07-15")
fn parse_date(date_str: &str) -> Result<NaiveDate, ForecastError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ForecastError::InvalidTimeFormat(date_str.to_string()))
}

/// Keeps an array only if it lines up with the time axis
fn aligned<T>(values: Vec<T>, len: usize, name: &str) -> Vec<T> {
    if values.len() == len {
        values
    } else {
        if !values.is_empty() {
            debug!(
                variable = name,
                expected = len,
                found = values.len(),
                "dropping misaligned array"
            );
        }
        Vec::new()
    }
}

/// WMO codes are small non-negative integers; anything else is treated as missing
fn weather_code(value: Option<f64>) -> Option<u8> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u8::MAX))
        .map(|v| v.round() as u8)
}

/// Deserializes a JSON array that may also be `null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Open-Meteo forecast response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default)]
    current: Option<RawCurrent>,
    #[serde(default)]
    hourly: Option<RawHourly>,
    #[serde(default)]
    daily: Option<RawDaily>,
}

/// Current conditions from Open-Meteo
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCurrent {
    time: Option<String>,
    temperature_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    precipitation: Option<f64>,
    cloud_cover: Option<f64>,
    pressure_msl: Option<f64>,
    wind_speed_10m: Option<f64>,
    wind_gusts_10m: Option<f64>,
    wind_direction_10m: Option<f64>,
}

impl RawCurrent {
    fn into_observation(self) -> CurrentObservation {
        CurrentObservation {
            // An unreadable observation time only costs the "as of" label
            time: self.time.as_deref().and_then(|t| parse_datetime(t).ok()),
            temperature_2m: self.temperature_2m,
            apparent_temperature: self.apparent_temperature,
            precipitation: self.precipitation,
            cloud_cover: self.cloud_cover,
            pressure_msl: self.pressure_msl,
            wind_speed_10m: self.wind_speed_10m,
            wind_gusts_10m: self.wind_gusts_10m,
            wind_direction_10m: self.wind_direction_10m,
        }
    }
}

/// Hourly arrays from Open-Meteo
#[derive(Debug, Default, Deserialize)]
struct RawHourly {
    #[serde(default, deserialize_with = "null_as_empty")]
    time: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    apparent_temperature: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    dew_point_2m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    precipitation: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    cloud_cover: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    wind_gusts_10m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    wind_direction_10m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    uv_index: Vec<Option<f64>>,
}

impl RawHourly {
    fn into_series(self) -> Result<HourlySeries, ForecastError> {
        let time = self
            .time
            .iter()
            .map(|t| parse_datetime(t))
            .collect::<Result<Vec<_>, _>>()?;
        let n = time.len();
        Ok(HourlySeries {
            temperature_2m: aligned(self.temperature_2m, n, "temperature_2m"),
            apparent_temperature: aligned(self.apparent_temperature, n, "apparent_temperature"),
            relative_humidity_2m: aligned(self.relative_humidity_2m, n, "relative_humidity_2m"),
            dew_point_2m: aligned(self.dew_point_2m, n, "dew_point_2m"),
            precipitation_probability: aligned(
                self.precipitation_probability,
                n,
                "precipitation_probability",
            ),
            precipitation: aligned(self.precipitation, n, "precipitation"),
            cloud_cover: aligned(self.cloud_cover, n, "cloud_cover"),
            wind_speed_10m: aligned(self.wind_speed_10m, n, "wind_speed_10m"),
            wind_gusts_10m: aligned(self.wind_gusts_10m, n, "wind_gusts_10m"),
            wind_direction_10m: aligned(self.wind_direction_10m, n, "wind_direction_10m"),
            uv_index: aligned(self.uv_index, n, "uv_index"),
            time,
        })
    }
}

/// Daily arrays from Open-Meteo
#[derive(Debug, Default, Deserialize)]
struct RawDaily {
    #[serde(default, deserialize_with = "null_as_empty")]
    time: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    weather_code: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    uv_index_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    wind_speed_10m_max: Vec<Option<f64>>,
}

impl RawDaily {
    fn into_series(self) -> Result<DailySeries, ForecastError> {
        let time = self
            .time
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<Vec<_>, _>>()?;
        let n = time.len();
        let codes = self.weather_code.into_iter().map(weather_code).collect();
        Ok(DailySeries {
            weather_code: aligned(codes, n, "weather_code"),
            temperature_2m_max: aligned(self.temperature_2m_max, n, "temperature_2m_max"),
            temperature_2m_min: aligned(self.temperature_2m_min, n, "temperature_2m_min"),
            precipitation_sum: aligned(self.precipitation_sum, n, "precipitation_sum"),
            uv_index_max: aligned(self.uv_index_max, n, "uv_index_max"),
            wind_speed_10m_max: aligned(self.wind_speed_10m_max, n, "wind_speed_10m_max"),
            time,
        })
    }
}
