//! PVGIS photovoltaic production client
//!
//! Fetches an hourly PV power series from the JRC PVGIS `seriescalc` service
//! for a fixed reference installation. The row format varies between service
//! versions, so timestamp and power fields are read leniently.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::Coordinates;
use crate::pipeline::{effective_peak_kwc, PvSample};

/// Base URL for the PVGIS hourly series endpoint
const PVGIS_BASE_URL: &str = "https://re.jrc.ec.europa.eu/api/v5_2/seriescalc";

/// Panel tilt in degrees from horizontal
pub const PANEL_TILT_DEG: u8 = 35;

/// Panel azimuth in degrees (0 = due south)
pub const PANEL_ASPECT_DEG: u8 = 0;

/// System losses in percent
pub const SYSTEM_LOSS_PCT: u8 = 14;

/// Errors that can occur when fetching PV production data
#[derive(Debug, Error)]
pub enum PvgisError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The response carried no hourly series
    #[error("PVGIS returned no hourly data")]
    NoData,
}

/// Parsed PV series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PvSeries {
    pub samples: Vec<PvSample>,
    /// Rows dropped because their timestamp could not be read
    pub skipped: usize,
}

/// PVGIS response structure
#[derive(Debug, Deserialize)]
struct SeriesResponse {
    #[serde(default)]
    outputs: Option<Outputs>,
}

#[derive(Debug, Deserialize)]
struct Outputs {
    #[serde(default)]
    hourly: Option<Vec<SeriesRow>>,
    #[serde(default)]
    series: Option<Vec<SeriesRow>>,
}

/// One row of the series; field names differ between PVGIS versions
#[derive(Debug, Deserialize)]
struct SeriesRow {
    #[serde(default)]
    time: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    time_utc: Option<Value>,
    #[serde(default, rename = "P")]
    power_upper: Option<Value>,
    #[serde(default, rename = "p")]
    power_lower: Option<Value>,
}

impl SeriesRow {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        [&self.time, &self.timestamp, &self.date, &self.time_utc]
            .into_iter()
            .flatten()
            .find(|v| is_present(v))
            .and_then(value_to_timestamp)
    }

    /// Instantaneous power in W; a missing field reads as 0
    fn power_w(&self) -> f64 {
        let value = [&self.power_upper, &self.power_lower]
            .into_iter()
            .flatten()
            .find(|v| !v.is_null());
        match value {
            None => 0.0,
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            Some(_) => 0.0,
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn value_to_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        // Numeric timestamps are epoch milliseconds
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Reads the timestamp formats PVGIS has been seen to emit.
///
/// Times without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y%m%d:%H%M"];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parses a PVGIS response body into samples
pub fn parse_series(body: &str) -> Result<PvSeries, PvgisError> {
    let response: SeriesResponse = serde_json::from_str(body)?;
    let rows = response
        .outputs
        .and_then(|outputs| outputs.hourly.or(outputs.series))
        .unwrap_or_default();
    if rows.is_empty() {
        return Err(PvgisError::NoData);
    }

    let mut series = PvSeries::default();
    for row in &rows {
        match row.timestamp() {
            Some(timestamp) => series.samples.push(PvSample {
                timestamp,
                power_w: row.power_w(),
            }),
            None => series.skipped += 1,
        }
    }
    if series.skipped > 0 {
        debug!(skipped = series.skipped, "PVGIS rows without a readable timestamp");
    }
    Ok(series)
}

/// Client for the PVGIS hourly production series
#[derive(Debug, Clone)]
pub struct PvgisClient {
    client: Client,
    base_url: String,
}

impl Default for PvgisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PvgisClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: PVGIS_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new()
        }
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Fetch the hourly series for one calendar year
    ///
    /// # Arguments
    /// * `coordinates` - Installation location
    /// * `peak_kwc` - Rated peak power; floored at 0.1 kWc
    /// * `year` - Year of the series
    pub async fn fetch_series(
        &self,
        coordinates: Coordinates,
        peak_kwc: f64,
        year: i32,
    ) -> Result<PvSeries, PvgisError> {
        let peak = effective_peak_kwc(peak_kwc);
        debug!(peak, year, "requesting PVGIS series");
        let text = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("startyear", year.to_string()),
                ("endyear", year.to_string()),
                ("pvtechchoice", "crystSi".to_string()),
                ("peakpower", peak.to_string()),
                ("mountingplace", "free".to_string()),
                ("angle", PANEL_TILT_DEG.to_string()),
                ("aspect", PANEL_ASPECT_DEG.to_string()),
                ("loss", SYSTEM_LOSS_PCT.to_string()),
                ("timeformat", "iso8601".to_string()),
                ("outputformat", "json".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let series = parse_series(&text)?;
        info!(samples = series.samples.len(), "PVGIS series received");
        Ok(series)
    }
}
