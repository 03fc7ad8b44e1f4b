//! Day-card color model
//!
//! A day card is tinted with a two-stop diagonal gradient whose colors follow
//! the weather category and whose opacity grows with rain and warmth.

use super::classify::WeatherIcon;
use super::clamp01;

/// Rain amount (mm) at which the rain factor saturates
const RAIN_SATURATION_MM: f64 = 25.0;

/// Max temperature (°C) at which the warmth factor starts rising
const WARMTH_FLOOR_C: f64 = 5.0;

/// Temperature span (°C) over which the warmth factor goes from 0 to 1
const WARMTH_SPAN_C: f64 = 20.0;

/// Ratio between the second and first stop opacity
const SECOND_STOP_FADE: f64 = 0.9;

/// Upper bound for each week-map tint stop
const WEEK_TINT_MAX_ALPHA: f64 = 0.35;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Composites `self` at opacity `alpha` over `background`
    pub fn over(self, background: Rgb, alpha: f64) -> Rgb {
        let a = clamp01(alpha);
        let mix = |fg: u8, bg: u8| -> u8 {
            (f64::from(fg) * a + f64::from(bg) * (1.0 - a)).round() as u8
        };
        Rgb(
            mix(self.0, background.0),
            mix(self.1, background.1),
            mix(self.2, background.2),
        )
    }
}

/// Two color stops, each with its own opacity, blended along a 135° diagonal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub from: Rgb,
    pub from_alpha: f64,
    pub to: Rgb,
    pub to_alpha: f64,
}

impl Gradient {
    /// CSS `linear-gradient` expression for web renderers
    pub fn to_css(&self) -> String {
        format!(
            "linear-gradient(135deg, rgba({},{},{},{}), rgba({},{},{},{}))",
            self.from.0,
            self.from.1,
            self.from.2,
            self.from_alpha,
            self.to.0,
            self.to.1,
            self.to.2,
            self.to_alpha
        )
    }

    /// Both stops flattened onto an opaque background
    pub fn over(&self, background: Rgb) -> (Rgb, Rgb) {
        (
            self.from.over(background, self.from_alpha),
            self.to.over(background, self.to_alpha),
        )
    }
}

/// Computes the gradient for a daily forecast card.
///
/// `rain` is the day's precipitation sum in mm, `tmax` its maximum temperature
/// in °C. A missing `tmax` (or any NaN) contributes nothing to the opacity.
pub fn day_gradient(code: Option<u8>, rain: f64, tmax: Option<f64>) -> Gradient {
    let r = clamp01(rain / RAIN_SATURATION_MM);
    let t = tmax.map_or(0.0, |tmax| clamp01((tmax - WARMTH_FLOOR_C) / WARMTH_SPAN_C));

    let (from, to, base) = match WeatherIcon::from_code(code) {
        WeatherIcon::Clear => (Rgb(255, 255, 200), Rgb(173, 216, 230), 0.12 + 0.18 * t),
        WeatherIcon::PartlyCloudy | WeatherIcon::Fog => (
            Rgb(200, 200, 200),
            Rgb(255, 255, 255),
            0.12 + 0.05 * r + 0.10 * t,
        ),
        WeatherIcon::Rain => (
            Rgb(70, 130, 180),
            Rgb(30, 60, 120),
            0.15 + 0.25 * r + 0.05 * t,
        ),
        WeatherIcon::Snow => (Rgb(180, 200, 255), Rgb(255, 255, 255), 0.12 + 0.10 * r),
        WeatherIcon::Thunderstorm => (Rgb(90, 90, 120), Rgb(40, 40, 70), 0.15 + 0.15 * r),
        WeatherIcon::Cloudy => (Rgb(230, 230, 230), Rgb(250, 250, 250), 0.10 + 0.10 * t),
    };

    Gradient {
        from,
        from_alpha: clamp01(base),
        to,
        to_alpha: clamp01(base * SECOND_STOP_FADE),
    }
}

/// Tint for a week-map cell: indigo for rain (saturating at 30 mm × 0.35),
/// sky blue for wind (saturating at 80 km/h × 0.35).
pub fn week_cell_tint(rain_mm: f64, wind_max_kmh: f64) -> Gradient {
    let tint = |value: f64, scale: f64| -> f64 {
        if value.is_nan() {
            0.0
        } else {
            (value / scale).clamp(0.0, WEEK_TINT_MAX_ALPHA)
        }
    };
    Gradient {
        from: Rgb(99, 102, 241),
        from_alpha: tint(rain_mm, 30.0),
        to: Rgb(56, 189, 248),
        to_alpha: tint(wind_max_kmh, 80.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_clear_day_warms_with_temperature() {
        let cold = day_gradient(Some(0), 0.0, Some(5.0));
        let hot = day_gradient(Some(0), 0.0, Some(25.0));
        assert!(close(cold.from_alpha, 0.12));
        assert!(close(hot.from_alpha, 0.30));
        assert!(close(hot.to_alpha, 0.27));
        assert_eq!(hot.from, Rgb(255, 255, 200));
        assert_eq!(hot.to, Rgb(173, 216, 230));
    }

    #[test]
    fn test_rain_day_formula() {
        // r = 0.5, t = 0.5
        let g = day_gradient(Some(61), 12.5, Some(15.0));
        assert!(close(g.from_alpha, 0.15 + 0.125 + 0.025));
        assert!(close(g.to_alpha, (0.15 + 0.125 + 0.025) * 0.9));
        assert_eq!(g.from, Rgb(70, 130, 180));
    }

    #[test]
    fn test_fog_shares_cloudy_palette() {
        let fog = day_gradient(Some(45), 5.0, Some(10.0));
        let cloudy = day_gradient(Some(2), 5.0, Some(10.0));
        assert_eq!(fog, cloudy);
    }

    #[test]
    fn test_snow_and_storm_ignore_temperature() {
        let snow_cold = day_gradient(Some(73), 10.0, Some(-5.0));
        let snow_warm = day_gradient(Some(73), 10.0, Some(30.0));
        assert_eq!(snow_cold, snow_warm);
        let storm = day_gradient(Some(95), 25.0, None);
        assert!(close(storm.from_alpha, 0.30));
    }

    #[test]
    fn test_missing_tmax_counts_as_cold() {
        let g = day_gradient(None, 0.0, None);
        assert!(close(g.from_alpha, 0.10));
        assert_eq!(g.from, Rgb(230, 230, 230));
        let nan = day_gradient(Some(0), f64::NAN, Some(f64::NAN));
        assert!(close(nan.from_alpha, 0.12));
    }

    #[test]
    fn test_alphas_stay_in_unit_range() {
        let codes: Vec<Option<u8>> = (0..=u8::MAX).map(Some).chain([None]).collect();
        let rains = [0.0, 0.5, 10.0, 25.0, 100.0, 1000.0];
        let temps = [None, Some(-50.0), Some(0.0), Some(15.0), Some(25.0), Some(60.0)];
        for &code in &codes {
            for &rain in &rains {
                for &tmax in &temps {
                    let g = day_gradient(code, rain, tmax);
                    assert!((0.0..=1.0).contains(&g.from_alpha), "{:?}", g);
                    assert!((0.0..=1.0).contains(&g.to_alpha), "{:?}", g);
                }
            }
        }
    }

    #[test]
    fn test_css_output() {
        let g = day_gradient(Some(0), 0.0, None);
        let css = g.to_css();
        assert!(css.starts_with("linear-gradient(135deg, rgba(255,255,200,0.12), rgba(173,216,230,0.1"));
        assert!(css.ends_with("))"));
    }

    #[test]
    fn test_over_composites_toward_background() {
        let black = Rgb(0, 0, 0);
        assert_eq!(Rgb(200, 100, 50).over(black, 0.5), Rgb(100, 50, 25));
        assert_eq!(Rgb(200, 100, 50).over(black, 0.0), black);
        assert_eq!(Rgb(200, 100, 50).over(black, 1.0), Rgb(200, 100, 50));
    }

    #[test]
    fn test_week_cell_tint_caps() {
        let calm = week_cell_tint(0.0, 0.0);
        assert!(close(calm.from_alpha, 0.0));
        assert!(close(calm.to_alpha, 0.0));
        let mid = week_cell_tint(6.0, 16.0);
        assert!(close(mid.from_alpha, 0.2));
        assert!(close(mid.to_alpha, 0.2));
        let wild = week_cell_tint(300.0, 200.0);
        assert!(close(wild.from_alpha, 0.35));
        assert!(close(wild.to_alpha, 0.35));
    }
}
