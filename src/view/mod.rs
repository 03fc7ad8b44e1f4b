//! View models
//!
//! Pure functions from a [`ForecastPayload`](crate::data::ForecastPayload) or
//! PV outlook to display-ready records. Every number is already formatted, so
//! the terminal screens and the text report render the same strings.

pub mod chart;
pub mod current;
pub mod days;
pub mod hours;
pub mod solar;

pub use chart::{hourly_chart, AxisBounds, ChartStyle, HourlyChart, WindSeries};
pub use current::{current_view, CurrentView};
pub use days::{day_cards, week_cells, DayCard, WeekCell};
pub use hours::{day_hours, DayHourRow, DayHours, RowToggles};
pub use solar::{solar_cells, solar_assumptions, SolarCell};

use chrono::{NaiveDate, NaiveDateTime};

/// Hour label such as `14:00`
pub fn hour_label(time: NaiveDateTime) -> String {
    time.format("%H:00").to_string()
}

/// Day label such as `Mon 15`
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %d").to_string()
}

/// Observation time such as `14:45`
pub fn time_label(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let time = NaiveDate::from_ymd_opt(2024, 7, 15)
            .unwrap()
            .and_hms_opt(9, 45, 0)
            .unwrap();
        assert_eq!(hour_label(time), "09:00");
        assert_eq!(time_label(time), "09:45");
        assert_eq!(day_label(time.date()), "Mon 15");
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2024, 7, 6).unwrap()), "Sat 06");
    }
}
