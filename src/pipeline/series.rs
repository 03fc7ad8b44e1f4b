//! Hourly and daily series alignment
//!
//! Open-Meteo returns each variable as a separate array keyed by a shared
//! index. These helpers pick windows out of those arrays without ever padding
//! or failing on short input.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::data::HourlySeries;

/// Hours shown on the overview chart
pub const DEFAULT_WINDOW_HOURS: usize = 24;

/// Probability (%) at or above which an hour is drawn as showers
const SHOWER_PROBABILITY_PCT: f64 = 50.0;

/// WMO code used for an hour likely to see showers
const SHOWER_CODE: u8 = 80;

/// WMO code used when the day's code is missing
const FALLBACK_CODE: u8 = 1;

/// Synthetic probability for an hour with measurable precipitation
const WET_HOUR_PROBABILITY_PCT: f64 = 50.0;

/// Synthetic probability for a dry hour
const DRY_HOUR_PROBABILITY_PCT: f64 = 10.0;

fn head<T: Clone>(values: &[T], n: usize) -> Vec<T> {
    values.iter().take(n).cloned().collect()
}

/// Returns the first `n` samples of every hourly array.
///
/// Arrays shorter than `n` are returned whole.
pub fn first_window_hours(hourly: &HourlySeries, n: usize) -> HourlySeries {
    HourlySeries {
        time: head(&hourly.time, n),
        temperature_2m: head(&hourly.temperature_2m, n),
        apparent_temperature: head(&hourly.apparent_temperature, n),
        relative_humidity_2m: head(&hourly.relative_humidity_2m, n),
        dew_point_2m: head(&hourly.dew_point_2m, n),
        precipitation_probability: head(&hourly.precipitation_probability, n),
        precipitation: head(&hourly.precipitation, n),
        cloud_cover: head(&hourly.cloud_cover, n),
        wind_speed_10m: head(&hourly.wind_speed_10m, n),
        wind_gusts_10m: head(&hourly.wind_gusts_10m, n),
        wind_direction_10m: head(&hourly.wind_direction_10m, n),
        uv_index: head(&hourly.uv_index, n),
    }
}

/// Fills in precipitation probability when the model does not provide it.
///
/// When `pop` is empty, each hour gets 50% if its precipitation amount is
/// above zero and 10% otherwise. This is a display heuristic, not a
/// forecast quantity. A non-empty `pop` is returned unchanged.
pub fn precipitation_probability_fallback(
    pop: &[Option<f64>],
    rain: &[Option<f64>],
) -> Vec<Option<f64>> {
    if !pop.is_empty() {
        return pop.to_vec();
    }
    rain.iter()
        .map(|amount| {
            if amount.is_some_and(|mm| mm > 0.0) {
                Some(WET_HOUR_PROBABILITY_PCT)
            } else {
                Some(DRY_HOUR_PROBABILITY_PCT)
            }
        })
        .collect()
}

/// Indices of the hourly timestamps that fall on `day`.
///
/// Timestamps are local times in the forecast's timezone, compared naively
/// against `[day 00:00, day + 24h)`.
pub fn day_hour_slice(hourly_times: &[NaiveDateTime], day: NaiveDate) -> Vec<usize> {
    let start = day.and_time(chrono::NaiveTime::MIN);
    let end = start + Duration::hours(24);
    hourly_times
        .iter()
        .enumerate()
        .filter(|(_, t)| **t >= start && **t < end)
        .map(|(i, _)| i)
        .collect()
}

/// Approximates an hour's weather code from the day's code.
///
/// The forecast only carries weather codes per day, so an hour with a high
/// precipitation probability is shown as showers and every other hour
/// inherits the day's code.
pub fn hourly_weather_code_estimate(daily_code: Option<u8>, pop: Option<f64>) -> u8 {
    if pop.unwrap_or(0.0) >= SHOWER_PROBABILITY_PCT {
        SHOWER_CODE
    } else {
        daily_code.unwrap_or(FALLBACK_CODE)
    }
}
