//! PV outlook cells

use chrono::NaiveDate;

use crate::data::pvgis::{PANEL_TILT_DEG, SYSTEM_LOSS_PCT};
use crate::pipeline::{effective_peak_kwc, format_number, PvDailyAggregate};

use super::day_label;

#[derive(Debug, Clone, PartialEq)]
pub struct SolarCell {
    pub date: NaiveDate,
    pub label: String,
    pub sun_hours: String,
    pub energy_kwh: String,
}

pub fn solar_cells(days: &[PvDailyAggregate]) -> Vec<SolarCell> {
    days.iter()
        .map(|day| SolarCell {
            date: day.date,
            label: day_label(day.date),
            sun_hours: format_number(Some(f64::from(day.sun_hours)), 0),
            energy_kwh: format_number(Some(day.energy_kwh), 1),
        })
        .collect()
}

/// Installation assumptions shown under the outlook
pub fn solar_assumptions(peak_kwc: f64) -> String {
    format!(
        "Assumptions: {} kWc, {}° south, {}% losses (PVGIS)",
        format_number(Some(effective_peak_kwc(peak_kwc)), 1),
        PANEL_TILT_DEG,
        SYSTEM_LOSS_PCT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solar_cells() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let cells = solar_cells(&[PvDailyAggregate {
            date,
            sun_hours: 11,
            energy_kwh: 14.26,
        }]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].label, "Sat 01");
        assert_eq!(cells[0].sun_hours, "11");
        assert_eq!(cells[0].energy_kwh, "14.3");
    }

    #[test]
    fn test_assumptions_line() {
        assert_eq!(
            solar_assumptions(3.0),
            "Assumptions: 3.0 kWc, 35° south, 14% losses (PVGIS)"
        );
        assert_eq!(
            solar_assumptions(0.0),
            "Assumptions: 0.1 kWc, 35° south, 14% losses (PVGIS)"
        );
    }
}
