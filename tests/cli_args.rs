//! Integration tests for CLI argument handling
//!
//! Tests argument validation of the meteodash binary and the startup
//! configuration derived from parsed arguments.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_meteodash"))
        .args(args)
        .env_remove("METEODASH_PLACE")
        .env_remove("METEODASH_PEAK_KWC")
        .output()
        .expect("Failed to execute meteodash")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("meteodash"), "Help should mention meteodash");
    assert!(stdout.contains("--place"), "Help should mention --place flag");
    assert!(stdout.contains("--report"), "Help should mention --report flag");
}

#[test]
fn test_invalid_tab_prints_error_and_exits() {
    let output = run_cli(&["--tab", "radar"]);
    assert!(!output.status.success(), "Expected invalid tab to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid tab"),
        "Should print error message about invalid tab: {}",
        stderr
    );
}

#[test]
fn test_lone_latitude_is_rejected() {
    let output = run_cli(&["--lat", "45.5"]);
    assert!(!output.status.success(), "Expected a lone --lat to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--lat and --lon"),
        "Should explain that both coordinates are needed: {}",
        stderr
    );
}

#[test]
fn test_non_numeric_peak_is_rejected() {
    let output = run_cli(&["--peak", "lots"]);
    assert!(!output.status.success());
}

#[test]
fn test_tab_with_help_is_valid() {
    // --help wins over the other flags; the TUI never starts
    let output = run_cli(&["--tab", "sun", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use meteodash::app::Tab;
    use meteodash::cli::{parse_tab_arg, Cli, StartLocation, StartupConfig, DEFAULT_PLACE};

    #[test]
    fn test_cli_no_args_uses_default_place() {
        let cli = Cli::parse_from(["meteodash"]);
        assert!(cli.tab.is_none());
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.location,
            StartLocation::Search(DEFAULT_PLACE.to_string())
        );
    }

    #[test]
    fn test_cli_place_flag() {
        let cli = Cli::parse_from(["meteodash", "--place", "  Cognac "]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.location, StartLocation::Search("Cognac".to_string()));
    }

    #[test]
    fn test_cli_negative_longitude() {
        let cli = Cli::parse_from(["meteodash", "--lat", "45.56", "--lon", "-0.28"]);
        assert_eq!(cli.lon, Some(-0.28));
        let config = StartupConfig::from_cli(&cli).unwrap();
        match config.location {
            StartLocation::Fixed(place) => {
                assert_eq!(place.label, "Around me");
                assert_eq!(place.coordinates.latitude, 45.56);
            }
            other => panic!("Expected fixed location, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tab_arg_week_returns_week_map() {
        assert_eq!(parse_tab_arg("week").unwrap(), Tab::WeekMap);
    }

    #[test]
    fn test_parse_tab_arg_invalid_returns_error() {
        assert!(parse_tab_arg("invalid").is_err());
    }

    #[test]
    fn test_startup_config_report_and_peak() {
        let cli = Cli::parse_from(["meteodash", "--report", "--peak", "0", "--tab", "sun"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.report);
        assert_eq!(config.peak_kwc, 0.1);
        assert_eq!(config.initial_tab, Tab::Sun);
    }

    #[test]
    fn test_startup_config_lone_longitude_is_error() {
        let cli = Cli::parse_from(["meteodash", "--lon", "2.35"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }
}
