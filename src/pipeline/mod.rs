//! Forecast-to-presentation pipeline
//!
//! Pure derivations that turn raw forecast and PV series into the values the
//! presentation layer displays. Nothing in here performs I/O, and every
//! function is total: missing or malformed numbers degrade to defaults rather
//! than erroring.

pub mod classify;
pub mod format;
pub mod gradient;
pub mod pv;
pub mod series;

pub use classify::{beaufort, compass_bucket, WeatherIcon};
pub use format::{format_number, PLACEHOLDER};
pub use gradient::{day_gradient, week_cell_tint, Gradient, Rgb};
pub use pv::{effective_peak_kwc, seven_day_outlook, PvDailyAggregate, PvSample};
pub use series::{
    day_hour_slice, first_window_hours, hourly_weather_code_estimate,
    precipitation_probability_fallback,
};

/// Clamps to `[0, 1]`, treating NaN as 0
pub(crate) fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
