//! Photovoltaic production aggregation
//!
//! Folds an hourly PV power series into per-day energy and sun-hour totals,
//! then reads off a seven-day outlook starting today.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Smallest rated peak power (kWc) the aggregator will work with
pub const MIN_PEAK_KWC: f64 = 0.1;

/// Share of rated peak above which an hour counts as a sun-hour
const SUN_HOUR_FRACTION: f64 = 0.01;

/// Days in the outlook window, today included
pub const OUTLOOK_DAYS: i64 = 7;

/// One PV output sample: instantaneous power at a timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvSample {
    pub timestamp: DateTime<Utc>,
    pub power_w: f64,
}

/// Running totals for one calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PvDayBucket {
    /// Energy in Wh
    pub energy_wh: f64,
    /// Hours above the sun-hour threshold
    pub sun_hours: u32,
}

/// One day of the PV outlook
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvDailyAggregate {
    pub date: NaiveDate,
    pub sun_hours: u32,
    pub energy_kwh: f64,
}

/// Floors a requested peak power at [`MIN_PEAK_KWC`]; NaN also maps there.
pub fn effective_peak_kwc(peak_kwc: f64) -> f64 {
    if peak_kwc.is_nan() {
        MIN_PEAK_KWC
    } else {
        peak_kwc.max(MIN_PEAK_KWC)
    }
}

/// Power (W) an hour must exceed to count as a sun-hour: 1% of rated peak
pub fn sun_hour_threshold_w(peak_kwc: f64) -> f64 {
    effective_peak_kwc(peak_kwc) * 1000.0 * SUN_HOUR_FRACTION
}

/// Groups samples by UTC calendar date.
///
/// Each sample is taken as one hour at its instantaneous power, so the
/// energy sum in Wh equals the sum of the power readings.
pub fn fold_by_day(samples: &[PvSample], peak_kwc: f64) -> BTreeMap<NaiveDate, PvDayBucket> {
    let threshold = sun_hour_threshold_w(peak_kwc);
    let mut days: BTreeMap<NaiveDate, PvDayBucket> = BTreeMap::new();
    for sample in samples {
        let power = if sample.power_w.is_finite() {
            sample.power_w
        } else {
            0.0
        };
        let bucket = days.entry(sample.timestamp.date_naive()).or_default();
        bucket.energy_wh += power;
        if power > threshold {
            bucket.sun_hours += 1;
        }
    }
    days
}

/// Seven consecutive days from `today`, with zeros for days the series
/// does not cover.
pub fn seven_day_outlook(
    samples: &[PvSample],
    peak_kwc: f64,
    today: NaiveDate,
) -> Vec<PvDailyAggregate> {
    let days = fold_by_day(samples, peak_kwc);
    (0..OUTLOOK_DAYS)
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .map(|date| {
            let bucket = days.get(&date).copied().unwrap_or_default();
            PvDailyAggregate {
                date,
                sun_hours: bucket.sun_hours,
                energy_kwh: bucket.energy_wh / 1000.0,
            }
        })
        .collect()
}
