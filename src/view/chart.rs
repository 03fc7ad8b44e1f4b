//! Hourly chart bundle for the next 24 hours

use crate::data::HourlySeries;
use crate::pipeline::series::DEFAULT_WINDOW_HOURS;
use crate::pipeline::{first_window_hours, precipitation_probability_fallback};

use super::hour_label;

/// How the hourly series are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    #[default]
    Line,
    Bar,
}

impl ChartStyle {
    pub fn toggle(self) -> Self {
        match self {
            ChartStyle::Line => ChartStyle::Bar,
            ChartStyle::Bar => ChartStyle::Line,
        }
    }
}

/// Which wind variable the chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindSeries {
    #[default]
    Mean,
    Gusts,
}

impl WindSeries {
    pub fn toggle(self) -> Self {
        match self {
            WindSeries::Mean => WindSeries::Gusts,
            WindSeries::Gusts => WindSeries::Mean,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindSeries::Mean => "Wind (mean) km/h",
            WindSeries::Gusts => "Wind (gusts) km/h",
        }
    }
}

/// Suggested axis range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

/// Everything needed to draw the hourly chart
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyChart {
    pub labels: Vec<String>,
    pub temperature: Vec<Option<f64>>,
    /// Precipitation probability, heuristically filled when not forecast
    pub precipitation_probability: Vec<Option<f64>>,
    pub wind: Vec<Option<f64>>,
    pub wind_series: WindSeries,
    pub temperature_axis: AxisBounds,
    pub probability_axis: AxisBounds,
    pub wind_axis: AxisBounds,
}

impl HourlyChart {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn finite_values(values: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    values.iter().flatten().copied().filter(|v| v.is_finite())
}

/// Builds the chart bundle from the first 24 hours of `hourly`
pub fn hourly_chart(hourly: &HourlySeries, wind_series: WindSeries) -> HourlyChart {
    let window = first_window_hours(hourly, DEFAULT_WINDOW_HOURS);
    let wind = match wind_series {
        WindSeries::Mean => window.wind_speed_10m,
        WindSeries::Gusts => window.wind_gusts_10m,
    };
    let precipitation_probability =
        precipitation_probability_fallback(&window.precipitation_probability, &window.precipitation);

    let temperature_axis = AxisBounds {
        min: finite_values(&window.temperature_2m).fold(0.0, f64::min) - 2.0,
        max: finite_values(&window.temperature_2m).fold(10.0, f64::max) + 2.0,
    };
    let wind_axis = AxisBounds {
        min: 0.0,
        max: finite_values(&wind).fold(30.0, f64::max) + 10.0,
    };

    HourlyChart {
        labels: window.time.iter().copied().map(hour_label).collect(),
        temperature: window.temperature_2m,
        precipitation_probability,
        wind,
        wind_series,
        temperature_axis,
        probability_axis: AxisBounds {
            min: 0.0,
            max: 100.0,
        },
        wind_axis,
    }
}
