//! Numeric display formatting shared by every renderer

/// Shown in place of any missing or non-finite number
pub const PLACEHOLDER: &str = "—";

/// Formats a number with a fixed count of decimals.
///
/// Missing, NaN and infinite values all render as [`PLACEHOLDER`], so gaps in
/// upstream data show up the same way on every card.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Formats a number and appends a unit, or returns the bare placeholder
pub fn format_with_unit(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}{}", decimals, v, unit),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_decimals() {
        assert_eq!(format_number(Some(12.345), 1), "12.3");
        assert_eq!(format_number(Some(12.0), 0), "12");
        assert_eq!(format_number(Some(7.0), 2), "7.00");
        assert_eq!(format_number(Some(-3.26), 1), "-3.3");
    }

    #[test]
    fn test_format_missing_values_use_placeholder() {
        for decimals in 0..5 {
            assert_eq!(format_number(None, decimals), PLACEHOLDER);
            assert_eq!(format_number(Some(f64::NAN), decimals), PLACEHOLDER);
            assert_eq!(format_number(Some(f64::INFINITY), decimals), PLACEHOLDER);
            assert_eq!(format_number(Some(f64::NEG_INFINITY), decimals), PLACEHOLDER);
        }
    }

    #[test]
    fn test_format_reparse_within_half_unit() {
        let values = [0.0, 0.04, 1.5, 2.675, 13.333, -7.77, 1013.25, 99.999];
        for &value in &values {
            for decimals in 0..4usize {
                let text = format_number(Some(value), decimals);
                let parsed: f64 = text.parse().expect("formatted number should parse");
                let tolerance = 10f64.powi(-(decimals as i32)) / 2.0 + 1e-9;
                assert!(
                    (parsed - value).abs() <= tolerance,
                    "{} at {} decimals gave {}",
                    value,
                    decimals,
                    text
                );
            }
        }
    }

    #[test]
    fn test_format_with_unit() {
        assert_eq!(format_with_unit(Some(21.46), 1, "°C"), "21.5°C");
        assert_eq!(format_with_unit(None, 1, "°C"), PLACEHOLDER);
    }
}
