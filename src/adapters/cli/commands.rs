//! CLI Command Definitions
//!
//! Argument surface for the tailscope binary, parsed with clap derive.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Tailscope - drawdown regime analyzer for daily equity returns
#[derive(Parser, Debug)]
#[command(
    name = "tailscope",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drawdown regime analyzer for daily equity returns",
    long_about = "Tailscope characterizes the statistical drawdown regime of a single \
                  asset: how often large negative daily returns occur, how long since \
                  the last one, and how the asset behaves in the days after such drops."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch price history for a ticker and print the regime report
    Analyze(AnalyzeCmd),

    /// List the built-in analysis profiles
    Profiles,
}

/// Run one analysis
#[derive(Parser, Debug)]
pub struct AnalyzeCmd {
    /// Ticker symbol (e.g. AAPL, SPY)
    #[arg(value_name = "TICKER")]
    pub ticker: String,

    /// First date of the price history (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE", default_value = "2015-01-01",
          value_parser = parse_start_date)]
    pub start: NaiveDate,

    /// Analysis profile (standard, quick, risk, calendar)
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

fn parse_start_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}' (expected YYYY-MM-DD): {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_defaults() {
        let app = CliApp::try_parse_from(["tailscope", "analyze", "AAPL"]).unwrap();
        match app.command {
            Command::Analyze(cmd) => {
                assert_eq!(cmd.ticker, "AAPL");
                assert_eq!(
                    cmd.start,
                    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
                );
                assert!(cmd.profile.is_none());
                assert!(!cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_analyze_with_options() {
        let app = CliApp::try_parse_from([
            "tailscope", "analyze", "SPY", "--start", "2020-03-01", "--profile", "quick",
            "--json",
        ])
        .unwrap();
        match app.command {
            Command::Analyze(cmd) => {
                assert_eq!(cmd.start, NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
                assert_eq!(cmd.profile.as_deref(), Some("quick"));
                assert!(cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = CliApp::try_parse_from(["tailscope", "analyze", "SPY", "--start", "03/01/2020"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_profiles_command() {
        let app = CliApp::try_parse_from(["tailscope", "profiles"]).unwrap();
        assert!(matches!(app.command, Command::Profiles));
    }
}
