//! Plain-text report
//!
//! Resolves the start location, fetches the forecast and the PV series
//! concurrently and prints the same view models the dashboard shows.

use std::fmt::Write;

use chrono::{NaiveDate, Utc};
use futures::future;
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::{StartLocation, StartupConfig};
use crate::data::{ForecastError, ForecastPayload, GeocodingError, Place};
use crate::fetch::{load_outlook, Clients};
use crate::pipeline::format_number;
use crate::session::SolarOutlook;
use crate::view::{
    current_view, day_cards, hourly_chart, solar_assumptions, solar_cells, WindSeries,
};

/// Every how many hours the 24-hour summary prints a line
const HOURLY_STEP: usize = 3;

/// Errors that abort the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("No place found for \"{0}\"")]
    PlaceNotFound(String),

    #[error("Could not fetch the forecast: {0}")]
    Forecast(#[from] ForecastError),
}

/// Resolves `location` to a place; a search takes the best match
pub async fn resolve_place(
    clients: &Clients,
    location: &StartLocation,
) -> Result<Place, ReportError> {
    match location {
        StartLocation::Fixed(place) => Ok(place.clone()),
        StartLocation::Search(query) => {
            let best = clients.geocoding.search(query).await?.into_iter().next();
            best.map(|candidate| candidate.into_place())
                .ok_or_else(|| ReportError::PlaceNotFound(query.clone()))
        }
    }
}

/// Fetches everything and renders the report.
///
/// A PVGIS failure does not abort the report; it is printed in place of the
/// outlook.
pub async fn build_report(
    clients: &Clients,
    config: &StartupConfig,
    today: NaiveDate,
) -> Result<String, ReportError> {
    let place = resolve_place(clients, &config.location).await?;
    info!(place = %place.label, "building report");

    let (forecast, outlook) = future::join(
        clients.forecast.fetch_forecast(place.coordinates),
        load_outlook(&clients.pvgis, place.coordinates, config.peak_kwc, today),
    )
    .await;
    let forecast = forecast?;
    if let Err(e) = &outlook {
        warn!(error = %e, "report without PV outlook");
    }

    Ok(render_report(&place, &forecast, outlook.as_ref(), config.peak_kwc))
}

/// Runs report mode with production clients
pub async fn run(config: &StartupConfig) -> Result<String, ReportError> {
    let clients = Clients::new(&config.timezone, &config.language);
    build_report(&clients, config, Utc::now().date_naive()).await
}

/// Formats the report text
pub fn render_report(
    place: &Place,
    forecast: &ForecastPayload,
    outlook: Result<&SolarOutlook, &String>,
    peak_kwc: f64,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {})",
        place.label,
        format_number(Some(place.coordinates.latitude), 2),
        format_number(Some(place.coordinates.longitude), 2)
    );
    out.push('\n');

    let now = current_view(forecast);
    let _ = writeln!(out, "Now ({})", now.observed_at);
    let _ = writeln!(
        out,
        "  Temperature  {}°C, feels like {}",
        now.temperature, now.feels_like
    );
    let _ = writeln!(
        out,
        "  Rain         {} mm, {}% chance",
        now.rain_now, now.precipitation_probability
    );
    let _ = writeln!(out, "  Clouds       {}%", now.clouds);
    let _ = writeln!(out, "  Pressure     {} hPa", now.pressure);
    let _ = writeln!(out, "  Dew point    {}", now.dew_point);
    let _ = writeln!(
        out,
        "  Wind         {}, gusts {}, Beaufort {}",
        now.wind, now.gust, now.beaufort
    );
    let _ = writeln!(out, "  UV           {}", now.uv);
    out.push('\n');

    let chart = hourly_chart(&forecast.hourly, WindSeries::Mean);
    out.push_str("Next 24 hours\n");
    if chart.is_empty() {
        out.push_str("  No hourly data\n");
    }
    for i in (0..chart.labels.len()).step_by(HOURLY_STEP) {
        let at = |series: &[Option<f64>]| series.get(i).copied().flatten();
        let _ = writeln!(
            out,
            "  {}  {:>5}°C  {:>4}%  {:>4} km/h",
            chart.labels[i],
            format_number(at(&chart.temperature), 1),
            format_number(at(&chart.precipitation_probability), 0),
            format_number(at(&chart.wind), 0)
        );
    }
    out.push('\n');

    out.push_str("Days\n");
    let cards = day_cards(&forecast.daily);
    if cards.is_empty() {
        out.push_str("  No daily data\n");
    }
    for card in &cards {
        let _ = writeln!(
            out,
            "  {}  {:<14} {:>3}° / {:>3}°  {:>5} mm",
            card.label,
            card.icon.label(),
            card.temperature_max,
            card.temperature_min,
            card.rain
        );
    }
    out.push('\n');

    out.push_str("Sun (PVGIS)\n");
    match outlook {
        Ok(outlook) => {
            let cells = solar_cells(&outlook.days);
            if cells.is_empty() {
                out.push_str("  No days in range\n");
            }
            for cell in cells {
                let _ = writeln!(
                    out,
                    "  {}  {:>2} h sun  {:>5} kWh",
                    cell.label, cell.sun_hours, cell.energy_kwh
                );
            }
        }
        Err(e) => {
            let _ = writeln!(out, "  PVGIS error: {}", e);
        }
    }
    let _ = writeln!(out, "  {}", solar_assumptions(peak_kwc));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_server;
    use crate::data::{
        Coordinates, CurrentObservation, DailySeries, ForecastClient, GeocodingClient,
        HourlySeries, PvgisClient,
    };
    use crate::pipeline::PvDailyAggregate;
    use chrono::Duration;

    fn place() -> Place {
        Place {
            label: "Germignac, Nouvelle-Aquitaine (FR)".to_string(),
            coordinates: Coordinates {
                latitude: 45.5612,
                longitude: -0.2834,
            },
        }
    }

    fn payload() -> ForecastPayload {
        let day = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let start = day.and_hms_opt(0, 0, 0).unwrap();
        ForecastPayload {
            current: CurrentObservation {
                time: Some(start + Duration::hours(14)),
                temperature_2m: Some(24.3),
                apparent_temperature: Some(25.1),
                wind_speed_10m: Some(18.0),
                wind_gusts_10m: Some(33.0),
                wind_direction_10m: Some(250.0),
                ..Default::default()
            },
            hourly: HourlySeries {
                time: (0..24).map(|i| start + Duration::hours(i)).collect(),
                temperature_2m: (0..24).map(|i| Some(15.0 + i as f64 / 2.0)).collect(),
                precipitation: vec![Some(0.0); 24],
                wind_speed_10m: vec![Some(14.0); 24],
                ..Default::default()
            },
            daily: DailySeries {
                time: vec![day, day.succ_opt().unwrap()],
                weather_code: vec![Some(0), Some(61)],
                temperature_2m_max: vec![Some(27.0), Some(21.0)],
                temperature_2m_min: vec![Some(14.0), Some(13.0)],
                precipitation_sum: vec![Some(0.0), Some(8.4)],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_report_sections() {
        let outlook = SolarOutlook {
            peak_kwc: 3.0,
            days: vec![PvDailyAggregate {
                date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
                sun_hours: 11,
                energy_kwh: 14.26,
            }],
        };
        let report = render_report(&place(), &payload(), Ok(&outlook), 3.0);

        assert!(report.starts_with("Germignac, Nouvelle-Aquitaine (FR) (45.56, -0.28)\n"));
        assert!(report.contains("Now (14:00)"));
        assert!(report.contains("24.3°C, feels like 25.1°C"));
        assert!(report.contains("18 km/h WSW, gusts 33 km/h, Beaufort 3"));
        assert!(report.contains("  00:00   15.0°C"));
        assert!(report.contains("  03:00"));
        assert!(!report.contains("  01:00"));
        assert!(report.contains("Mon 15  Clear"));
        assert!(report.contains("Tue 16  Rain"));
        assert!(report.contains("8.4 mm"));
        assert!(report.contains("11 h sun   14.3 kWh"));
        assert!(report.contains("Assumptions: 3.0 kWc, 35° south, 14% losses (PVGIS)"));
    }

    #[test]
    fn test_report_with_missing_data_and_pv_error() {
        let error = "PVGIS returned no hourly data".to_string();
        let report = render_report(&place(), &ForecastPayload::default(), Err(&error), 0.0);
        assert!(report.contains("Now (—)"));
        assert!(report.contains("No hourly data"));
        assert!(report.contains("No daily data"));
        assert!(report.contains("PVGIS error: PVGIS returned no hourly data"));
        assert!(report.contains("Assumptions: 0.1 kWc"));
    }

    #[tokio::test]
    async fn test_resolve_fixed_place_skips_geocoding() {
        let clients = Clients::default();
        let resolved = resolve_place(&clients, &StartLocation::Fixed(place()))
            .await
            .expect("fixed place resolves");
        assert_eq!(resolved, place());
    }

    #[tokio::test]
    async fn test_resolve_unknown_place() {
        let base_url = test_server::serve_once("200 OK", r#"{"results": []}"#).await;
        let clients = Clients {
            geocoding: GeocodingClient::with_base_url(base_url)
                .with_http_client(test_server::http_client()),
            ..Default::default()
        };
        let result = resolve_place(&clients, &StartLocation::Search("Nowhere".to_string())).await;
        assert!(matches!(result, Err(ReportError::PlaceNotFound(q)) if q == "Nowhere"));
    }

    #[tokio::test]
    async fn test_build_report_over_http() {
        let forecast_body = r#"{
            "current": {"time": "2024-07-15T14:00", "temperature_2m": 24.3},
            "daily": {"time": ["2024-07-15"], "weather_code": [61],
                      "temperature_2m_max": [27.0], "temperature_2m_min": [14.0],
                      "precipitation_sum": [8.4]}
        }"#;
        let forecast_url = test_server::serve_once("200 OK", forecast_body).await;
        let pvgis_url = test_server::serve_once("500 Internal Server Error", "").await;
        let clients = Clients {
            geocoding: GeocodingClient::default(),
            forecast: ForecastClient::with_base_url(forecast_url)
                .with_http_client(test_server::http_client()),
            pvgis: PvgisClient::with_base_url(pvgis_url)
                .with_http_client(test_server::http_client()),
        };
        let config = StartupConfig {
            location: StartLocation::Fixed(place()),
            ..Default::default()
        };

        let report = build_report(&clients, &config, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
            .await
            .expect("report should build");
        assert!(report.contains("Now (14:00)"));
        assert!(report.contains("Mon 15  Rain"));
        assert!(report.contains("PVGIS error:"));
    }

    #[tokio::test]
    async fn test_build_report_forecast_failure() {
        let forecast_url = test_server::serve_once("503 Service Unavailable", "").await;
        let pvgis_url = test_server::serve_once("500 Internal Server Error", "").await;
        let clients = Clients {
            geocoding: GeocodingClient::default(),
            forecast: ForecastClient::with_base_url(forecast_url)
                .with_http_client(test_server::http_client()),
            pvgis: PvgisClient::with_base_url(pvgis_url)
                .with_http_client(test_server::http_client()),
        };
        let config = StartupConfig {
            location: StartLocation::Fixed(place()),
            ..Default::default()
        };
        let result =
            build_report(&clients, &config, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()).await;
        assert!(matches!(result, Err(ReportError::Forecast(_))));
    }
}
