//! Command-line interface parsing for meteodash
//!
//! This module handles parsing of CLI arguments using clap, with environment
//! variable fallbacks, and validates them into a [`StartupConfig`].

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::app::Tab;
use crate::data::forecast::DEFAULT_TIMEZONE;
use crate::data::geocoding::DEFAULT_LANGUAGE;
use crate::data::{Coordinates, Place};
use crate::pipeline::effective_peak_kwc;

/// Place resolved at startup when none is given
pub const DEFAULT_PLACE: &str = "Germignac";

/// Label used for a location given as raw coordinates
pub const COORDINATES_LABEL: &str = "Around me";

/// Rated PV peak (kWc) when none is given
pub const DEFAULT_PEAK_KWC: f64 = 3.0;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified tab name is not recognized
    #[error("Invalid tab: '{0}'. Valid tabs: overview, week, hours, sun")]
    InvalidTab(String),

    /// Only one of --lat/--lon was given
    #[error("--lat and --lon must be given together")]
    IncompleteCoordinates,
}

/// meteodash - Weather forecast and solar production dashboard
#[derive(Parser, Debug)]
#[command(name = "meteodash")]
#[command(about = "Weather forecast and solar production dashboard")]
#[command(version)]
pub struct Cli {
    /// Place to show at startup (best geocoding match)
    #[arg(long, value_name = "NAME", env = "METEODASH_PLACE", default_value = DEFAULT_PLACE)]
    pub place: String,

    /// Latitude in decimal degrees; skips geocoding (requires --lon)
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees; skips geocoding (requires --lat)
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Rated peak power of the PV installation in kWc
    #[arg(long, value_name = "KWC", env = "METEODASH_PEAK_KWC", default_value_t = DEFAULT_PEAK_KWC)]
    pub peak: f64,

    /// Timezone forecast times are expressed in
    #[arg(long, value_name = "TZ", env = "METEODASH_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Language for place names
    #[arg(long, value_name = "CODE", env = "METEODASH_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Tab to open first
    ///
    /// Valid tabs: overview, week, hours, sun
    #[arg(long, value_name = "TAB")]
    pub tab: Option<String>,

    /// Fetch once, print a plain-text report and exit
    #[arg(long)]
    pub report: bool,

    /// Write logs to this file instead of the default cache location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Where the dashboard starts
#[derive(Debug, Clone, PartialEq)]
pub enum StartLocation {
    /// Resolve a place name through geocoding
    Search(String),
    /// Use known coordinates directly
    Fixed(Place),
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub location: StartLocation,
    /// Peak power, already floored
    pub peak_kwc: f64,
    pub timezone: String,
    pub language: String,
    pub initial_tab: Tab,
    pub report: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            location: StartLocation::Search(DEFAULT_PLACE.to_string()),
            peak_kwc: DEFAULT_PEAK_KWC,
            timezone: DEFAULT_TIMEZONE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            initial_tab: Tab::Overview,
            report: false,
            log_file: None,
        }
    }
}

/// Parses a tab name argument.
///
/// # Returns
/// * `Ok(Tab)` if the name matches a tab
/// * `Err(CliError::InvalidTab)` otherwise
pub fn parse_tab_arg(s: &str) -> Result<Tab, CliError> {
    Tab::from_name(s).ok_or_else(|| CliError::InvalidTab(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` for an unknown tab or a lone `--lat`/`--lon`
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let location = match (cli.lat, cli.lon) {
            (Some(latitude), Some(longitude)) => StartLocation::Fixed(Place {
                label: COORDINATES_LABEL.to_string(),
                coordinates: Coordinates {
                    latitude,
                    longitude,
                },
            }),
            (None, None) => StartLocation::Search(cli.place.trim().to_string()),
            _ => return Err(CliError::IncompleteCoordinates),
        };
        let initial_tab = match &cli.tab {
            Some(name) => parse_tab_arg(name)?,
            None => Tab::Overview,
        };

        Ok(StartupConfig {
            location,
            peak_kwc: effective_peak_kwc(cli.peak),
            timezone: cli.timezone.clone(),
            language: cli.language.clone(),
            initial_tab,
            report: cli.report,
            log_file: cli.log_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_arg_names() {
        assert_eq!(parse_tab_arg("overview").unwrap(), Tab::Overview);
        assert_eq!(parse_tab_arg("week").unwrap(), Tab::WeekMap);
        assert_eq!(parse_tab_arg("hours").unwrap(), Tab::WeekHours);
        assert_eq!(parse_tab_arg("SUN").unwrap(), Tab::Sun);
    }

    #[test]
    fn test_parse_tab_arg_invalid() {
        let err = parse_tab_arg("radar").unwrap_err();
        assert!(err.to_string().contains("Invalid tab"));
        assert!(err.to_string().contains("radar"));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["meteodash"]);
        assert_eq!(cli.place, DEFAULT_PLACE);
        assert!(cli.lat.is_none());
        assert!(cli.tab.is_none());
        assert!(!cli.report);
    }

    #[test]
    fn test_startup_config_from_cli_defaults() {
        let cli = Cli::parse_from(["meteodash"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config, StartupConfig::default());
    }

    #[test]
    fn test_startup_config_with_coordinates() {
        let cli = Cli::parse_from(["meteodash", "--lat", "45.56", "--lon", "-0.28"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        match config.location {
            StartLocation::Fixed(place) => {
                assert_eq!(place.label, COORDINATES_LABEL);
                assert!((place.coordinates.longitude + 0.28).abs() < 1e-9);
            }
            other => panic!("Expected fixed location, got {:?}", other),
        }
    }

    #[test]
    fn test_startup_config_lone_latitude() {
        let cli = Cli::parse_from(["meteodash", "--lat", "45.56"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::IncompleteCoordinates)
        ));
    }

    #[test]
    fn test_startup_config_options() {
        let cli = Cli::parse_from([
            "meteodash",
            "--place",
            " Cognac ",
            "--peak",
            "0",
            "--tab",
            "sun",
            "--timezone",
            "UTC",
            "--language",
            "fr",
            "--report",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.location, StartLocation::Search("Cognac".to_string()));
        assert_eq!(config.peak_kwc, 0.1);
        assert_eq!(config.initial_tab, Tab::Sun);
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.language, "fr");
        assert!(config.report);
    }

    #[test]
    fn test_startup_config_invalid_tab() {
        let cli = Cli::parse_from(["meteodash", "--tab", "radar"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidTab(_))
        ));
    }
}
