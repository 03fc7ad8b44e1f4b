//! Current conditions card

use crate::data::ForecastPayload;
use crate::pipeline::format::format_with_unit;
use crate::pipeline::{beaufort, compass_bucket, format_number, PLACEHOLDER};

use super::time_label;

/// Wind speed (km/h) that fills the wind gauge
const WIND_GAUGE_FULL_KMH: f64 = 120.0;

/// Formatted fields of the "now" card
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub observed_at: String,
    pub temperature: String,
    pub feels_like: String,
    pub rain_now: String,
    pub clouds: String,
    pub pressure: String,
    pub dew_point: String,
    /// Mean wind, e.g. `18 km/h WSW`
    pub wind: String,
    pub gust: String,
    /// Direction, e.g. `250° WSW`
    pub direction: String,
    pub beaufort: u8,
    pub uv: String,
    pub precipitation_probability: String,
    /// Wind gauge fill, 0-100
    pub wind_gauge_pct: f64,
}

/// Builds the current-conditions card.
///
/// Dew point, precipitation probability and UV come from the first hourly
/// and daily samples since the `current` section does not carry them.
/// Missing wind values count as calm.
pub fn current_view(payload: &ForecastPayload) -> CurrentView {
    let current = &payload.current;
    let finite_or_zero = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);
    let wind = finite_or_zero(current.wind_speed_10m);
    let gust = finite_or_zero(current.wind_gusts_10m);
    let direction = finite_or_zero(current.wind_direction_10m);
    let compass = compass_bucket(direction);

    let dew_point = payload.hourly.dew_point_2m.first().copied().flatten();
    let uv = payload.daily.uv_index_max.first().copied().flatten();
    let pop = payload.hourly.precipitation_probability.first().copied().flatten();

    CurrentView {
        observed_at: current
            .time
            .map(time_label)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        temperature: format_number(current.temperature_2m, 1),
        feels_like: format_with_unit(current.apparent_temperature, 1, "°C"),
        rain_now: format_number(current.precipitation, 1),
        clouds: format_number(current.cloud_cover, 0),
        pressure: format_number(current.pressure_msl, 0),
        dew_point: format_with_unit(dew_point, 1, "°C"),
        wind: format!("{} km/h {}", format_number(Some(wind), 0), compass),
        gust: format!("{} km/h", format_number(Some(gust), 0)),
        direction: format!("{}° {}", format_number(Some(direction), 0), compass),
        beaufort: beaufort(wind),
        uv: format_number(uv, 1),
        precipitation_probability: format_number(pop, 0),
        wind_gauge_pct: (wind / WIND_GAUGE_FULL_KMH * 100.0).clamp(0.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CurrentObservation, DailySeries, HourlySeries};
    use chrono::NaiveDate;

    fn payload() -> ForecastPayload {
        let time = NaiveDate::from_ymd_opt(2024, 7, 15)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        ForecastPayload {
            current: CurrentObservation {
                time: Some(time),
                temperature_2m: Some(24.34),
                apparent_temperature: Some(25.0),
                precipitation: Some(0.0),
                cloud_cover: Some(40.0),
                pressure_msl: Some(1016.4),
                wind_speed_10m: Some(18.4),
                wind_gusts_10m: Some(33.0),
                wind_direction_10m: Some(250.0),
            },
            hourly: HourlySeries {
                time: vec![time],
                dew_point_2m: vec![Some(12.26)],
                precipitation_probability: vec![Some(35.0)],
                ..Default::default()
            },
            daily: DailySeries {
                time: vec![time.date()],
                uv_index_max: vec![Some(7.15)],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_current_view_formats_fields() {
        let view = current_view(&payload());
        assert_eq!(view.observed_at, "14:00");
        assert_eq!(view.temperature, "24.3");
        assert_eq!(view.feels_like, "25.0°C");
        assert_eq!(view.rain_now, "0.0");
        assert_eq!(view.clouds, "40");
        assert_eq!(view.pressure, "1016");
        assert_eq!(view.dew_point, "12.3°C");
        assert_eq!(view.wind, "18 km/h WSW");
        assert_eq!(view.gust, "33 km/h");
        assert_eq!(view.direction, "250° WSW");
        assert_eq!(view.beaufort, 3);
        assert_eq!(view.uv, "7.2");
        assert_eq!(view.precipitation_probability, "35");
        assert!((view.wind_gauge_pct - 18.4 / 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_payload_uses_placeholders() {
        let view = current_view(&ForecastPayload::default());
        assert_eq!(view.observed_at, PLACEHOLDER);
        assert_eq!(view.temperature, PLACEHOLDER);
        assert_eq!(view.feels_like, PLACEHOLDER);
        assert_eq!(view.dew_point, PLACEHOLDER);
        assert_eq!(view.uv, PLACEHOLDER);
        assert_eq!(view.precipitation_probability, PLACEHOLDER);
        // Missing wind counts as calm from the north
        assert_eq!(view.wind, "0 km/h N");
        assert_eq!(view.direction, "0° N");
        assert_eq!(view.beaufort, 0);
        assert_eq!(view.wind_gauge_pct, 0.0);
    }

    #[test]
    fn test_wind_gauge_caps_at_full() {
        let mut payload = payload();
        payload.current.wind_speed_10m = Some(150.0);
        let view = current_view(&payload);
        assert_eq!(view.wind_gauge_pct, 100.0);
        assert_eq!(view.beaufort, 12);
    }
}
