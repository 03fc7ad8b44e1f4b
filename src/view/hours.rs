//! Hour-by-hour breakdown of one forecast day

use chrono::NaiveDate;

use crate::data::{sample, ForecastPayload};
use crate::pipeline::{day_hour_slice, format_number, hourly_weather_code_estimate, WeatherIcon};

use super::{day_label, hour_label};

/// Which rows of the breakdown are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowToggles {
    pub temperature: bool,
    pub rain: bool,
    pub wind: bool,
}

impl Default for RowToggles {
    fn default() -> Self {
        Self {
            temperature: true,
            rain: true,
            wind: true,
        }
    }
}

/// One hour column of the breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct DayHourRow {
    pub hour: String,
    pub icon: WeatherIcon,
    pub temperature: String,
    pub precipitation_probability: String,
    pub wind: String,
}

/// The selected day's hours
#[derive(Debug, Clone, PartialEq)]
pub struct DayHours {
    pub date: NaiveDate,
    pub label: String,
    pub rows: Vec<DayHourRow>,
}

/// Breakdown for the day at `day_index` of the daily series.
///
/// Returns `None` when the index is past the last forecast day. A day with no
/// hourly samples yields an empty row list.
pub fn day_hours(payload: &ForecastPayload, day_index: usize) -> Option<DayHours> {
    let date = *payload.daily.time.get(day_index)?;
    let daily_code = sample(&payload.daily.weather_code, day_index);
    let hourly = &payload.hourly;

    let rows = day_hour_slice(&hourly.time, date)
        .into_iter()
        .map(|i| {
            let pop = sample(&hourly.precipitation_probability, i);
            DayHourRow {
                hour: hour_label(hourly.time[i]),
                icon: WeatherIcon::from_code(Some(hourly_weather_code_estimate(daily_code, pop))),
                temperature: format_number(sample(&hourly.temperature_2m, i), 0),
                precipitation_probability: format_number(Some(pop.unwrap_or(0.0)), 0),
                wind: format_number(Some(sample(&hourly.wind_speed_10m, i).unwrap_or(0.0)), 0),
            }
        })
        .collect();

    Some(DayHours {
        date,
        label: day_label(date),
        rows,
    })
}
