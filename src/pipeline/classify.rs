//! Scalar classifiers: Beaufort force, compass sectors and WMO icon categories

/// Upper-exclusive wind speed thresholds (km/h) for Beaufort forces 0 through 11
const BEAUFORT_THRESHOLDS_KMH: [f64; 12] = [
    2.0, 6.0, 12.0, 20.0, 29.0, 39.0, 50.0, 62.0, 75.0, 89.0, 103.0, 118.0,
];

/// Sixteen compass sectors, clockwise from north
const COMPASS_LABELS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Width of a compass sector in degrees
const SECTOR_DEGREES: f64 = 22.5;

/// Classifies a wind speed in km/h on the Beaufort scale (0-12).
///
/// NaN counts as calm, so callers can pass `value.unwrap_or(0.0)` for missing
/// readings without a separate branch.
pub fn beaufort(speed_kmh: f64) -> u8 {
    let speed = if speed_kmh.is_nan() { 0.0 } else { speed_kmh };
    BEAUFORT_THRESHOLDS_KMH
        .iter()
        .position(|&limit| speed < limit)
        .unwrap_or(BEAUFORT_THRESHOLDS_KMH.len()) as u8
}

/// Maps a bearing in degrees to one of the 16 compass labels.
///
/// Any finite bearing is accepted; it is wrapped into `[0, 360)` first, so
/// `-90` is `W` and `450` is `E`. NaN maps to `N`.
pub fn compass_bucket(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    // `as usize` saturates, so NaN lands on index 0
    let index = (normalized / SECTOR_DEGREES).round() as usize % COMPASS_LABELS.len();
    COMPASS_LABELS[index]
}

/// Visual category of a WMO weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    /// Fallback for codes outside the known ranges, and for missing codes
    Cloudy,
}

impl WeatherIcon {
    /// Categorizes a WMO weather code
    ///
    /// - 0: Clear sky
    /// - 1-3: Mainly clear to overcast
    /// - 45, 48: Fog
    /// - 51-67: Drizzle and rain, 80-82: Rain showers
    /// - 71-77: Snow
    /// - 95 and above: Thunderstorm
    pub fn from_code(code: Option<u8>) -> Self {
        match code {
            Some(0) => WeatherIcon::Clear,
            Some(1..=3) => WeatherIcon::PartlyCloudy,
            Some(45 | 48) => WeatherIcon::Fog,
            Some(51..=67 | 80..=82) => WeatherIcon::Rain,
            Some(71..=77) => WeatherIcon::Snow,
            Some(95..=u8::MAX) => WeatherIcon::Thunderstorm,
            _ => WeatherIcon::Cloudy,
        }
    }

    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "Clear",
            WeatherIcon::PartlyCloudy => "Partly cloudy",
            WeatherIcon::Fog => "Fog",
            WeatherIcon::Rain => "Rain",
            WeatherIcon::Snow => "Snow",
            WeatherIcon::Thunderstorm => "Thunderstorm",
            WeatherIcon::Cloudy => "Cloudy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beaufort_boundaries() {
        let cases = [
            (1.9, 0),
            (2.0, 1),
            (5.9, 1),
            (6.0, 2),
            (11.9, 2),
            (12.0, 3),
            (19.9, 3),
            (20.0, 4),
            (28.9, 4),
            (29.0, 5),
            (38.9, 5),
            (39.0, 6),
            (49.9, 6),
            (50.0, 7),
            (61.9, 7),
            (62.0, 8),
            (74.9, 8),
            (75.0, 9),
            (88.9, 9),
            (89.0, 10),
            (102.9, 10),
            (103.0, 11),
            (117.9, 11),
            (118.0, 12),
        ];
        for (speed, expected) in cases {
            assert_eq!(beaufort(speed), expected, "speed {} km/h", speed);
        }
    }

    #[test]
    fn test_beaufort_extremes() {
        assert_eq!(beaufort(-5.0), 0);
        assert_eq!(beaufort(0.0), 0);
        assert_eq!(beaufort(200.0), 12);
        assert_eq!(beaufort(f64::INFINITY), 12);
        assert_eq!(beaufort(f64::NAN), 0);
    }

    #[test]
    fn test_beaufort_is_monotonic() {
        let mut previous = 0;
        let mut speed = -10.0;
        while speed < 150.0 {
            let force = beaufort(speed);
            assert!(force >= previous, "beaufort dropped at {} km/h", speed);
            previous = force;
            speed += 0.1;
        }
    }

    #[test]
    fn test_compass_cardinal_points() {
        assert_eq!(compass_bucket(0.0), "N");
        assert_eq!(compass_bucket(90.0), "E");
        assert_eq!(compass_bucket(180.0), "S");
        assert_eq!(compass_bucket(270.0), "W");
        assert_eq!(compass_bucket(22.5), "NNE");
        assert_eq!(compass_bucket(337.5), "NNW");
    }

    #[test]
    fn test_compass_wraps_near_north() {
        assert_eq!(compass_bucket(355.0), "N");
        assert_eq!(compass_bucket(360.0), "N");
        assert_eq!(compass_bucket(11.0), "N");
        assert_eq!(compass_bucket(11.25), "NNE");
    }

    #[test]
    fn test_compass_normalizes_out_of_range() {
        assert_eq!(compass_bucket(-90.0), "W");
        assert_eq!(compass_bucket(-180.0), "S");
        assert_eq!(compass_bucket(450.0), "E");
        assert_eq!(compass_bucket(f64::NAN), "N");
    }

    #[test]
    fn test_compass_is_periodic() {
        let mut deg = -720.0;
        while deg < 720.0 {
            assert_eq!(
                compass_bucket(deg),
                compass_bucket(deg + 360.0),
                "period broken at {}",
                deg
            );
            deg += 7.0;
        }
    }

    #[test]
    fn test_weather_icon_mapping() {
        assert_eq!(WeatherIcon::from_code(Some(0)), WeatherIcon::Clear);
        for code in [1, 2, 3] {
            assert_eq!(WeatherIcon::from_code(Some(code)), WeatherIcon::PartlyCloudy);
        }
        assert_eq!(WeatherIcon::from_code(Some(45)), WeatherIcon::Fog);
        assert_eq!(WeatherIcon::from_code(Some(48)), WeatherIcon::Fog);
        for code in [51, 55, 61, 66, 67, 80, 81, 82] {
            assert_eq!(WeatherIcon::from_code(Some(code)), WeatherIcon::Rain);
        }
        for code in [71, 73, 75, 77] {
            assert_eq!(WeatherIcon::from_code(Some(code)), WeatherIcon::Snow);
        }
        for code in [95, 96, 99, 120] {
            assert_eq!(WeatherIcon::from_code(Some(code)), WeatherIcon::Thunderstorm);
        }
    }

    #[test]
    fn test_weather_icon_defaults_to_cloudy() {
        for code in [4, 44, 50, 68, 70, 78, 79, 83, 85, 86, 94] {
            assert_eq!(WeatherIcon::from_code(Some(code)), WeatherIcon::Cloudy, "code {}", code);
        }
        assert_eq!(WeatherIcon::from_code(None), WeatherIcon::Cloudy);
    }
}
