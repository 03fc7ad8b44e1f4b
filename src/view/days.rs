//! Daily cards and week-map cells

use chrono::NaiveDate;

use crate::data::{DailySeries, DailySummary};
use crate::pipeline::{day_gradient, format_number, week_cell_tint, Gradient, WeatherIcon};

use super::day_label;

/// One card of the daily list
#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub date: NaiveDate,
    pub label: String,
    pub icon: WeatherIcon,
    pub temperature_max: String,
    pub temperature_min: String,
    pub rain: String,
    pub gradient: Gradient,
}

/// One cell of the week map
#[derive(Debug, Clone, PartialEq)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub label: String,
    pub icon: WeatherIcon,
    pub temperature_max: String,
    pub temperature_min: String,
    pub rain: String,
    pub wind_max: String,
    pub tint: Gradient,
}

fn day_card(day: &DailySummary) -> DayCard {
    let rain = day.precipitation_sum.unwrap_or(0.0);
    DayCard {
        date: day.date,
        label: day_label(day.date),
        icon: WeatherIcon::from_code(day.weather_code),
        temperature_max: format_number(day.temperature_max, 0),
        temperature_min: format_number(day.temperature_min, 0),
        rain: format_number(day.precipitation_sum, 1),
        gradient: day_gradient(day.weather_code, rain, day.temperature_max),
    }
}

fn week_cell(day: &DailySummary) -> WeekCell {
    // Missing rain and wind read as zero both in the text and in the tint
    let rain = day.precipitation_sum.unwrap_or(0.0);
    let wind = day.wind_speed_max.unwrap_or(0.0);
    WeekCell {
        date: day.date,
        label: day_label(day.date),
        icon: WeatherIcon::from_code(day.weather_code),
        temperature_max: format_number(day.temperature_max, 0),
        temperature_min: format_number(day.temperature_min, 0),
        rain: format_number(Some(rain), 1),
        wind_max: format_number(Some(wind), 0),
        tint: week_cell_tint(rain, wind),
    }
}

/// One card per forecast day
pub fn day_cards(daily: &DailySeries) -> Vec<DayCard> {
    daily.summaries().iter().map(day_card).collect()
}

/// One week-map cell per forecast day
pub fn week_cells(daily: &DailySeries) -> Vec<WeekCell> {
    daily.summaries().iter().map(week_cell).collect()
}
