//! Tailscope - Drawdown Regime Analyzer
//!
//! Fetches a ticker's daily price history and reports its statistical
//! drawdown regime: drop thresholds, event recency, rebound odds,
//! post-event forward returns and calendar seasonality.

mod adapters;
mod application;
mod config;
mod domain;
mod ports;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapters::cli::{AnalyzeCmd, CliApp, Command};
use crate::adapters::report::render_report;
use crate::adapters::stooq::StooqClient;
use crate::application::AnalysisOrchestrator;
use crate::config::{load_config, Config};
use crate::domain::analysis::AnalysisProfile;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present (proxy settings and the like go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Analyze(cmd) => analyze_command(cmd).await,
        Command::Profiles => profiles_command(),
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

async fn analyze_command(cmd: AnalyzeCmd) -> Result<()> {
    let config = match &cmd.config {
        Some(path) => load_config(path).context("Failed to load configuration")?,
        None => Config::default(),
    };

    let profile = config
        .analysis_profile(cmd.profile.as_deref())
        .context("Failed to resolve analysis profile")?;

    let client = StooqClient::with_base_url(&config.data.base_url, config.data.timeout_seconds)
        .context("Failed to create market data client")?;

    let orchestrator = AnalysisOrchestrator::new(client, profile);
    let result = orchestrator
        .run(&cmd.ticker, cmd.start)
        .await
        .with_context(|| format!("Analysis failed for {}", cmd.ticker))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_report(&result, &cmd.ticker));
    }

    Ok(())
}

fn profiles_command() -> Result<()> {
    for name in AnalysisProfile::PRESETS {
        // Presets are compiled in, so the lookup cannot fail here
        if let Some(profile) = AnalysisProfile::named(name) {
            println!(
                "{name:<10} min_observations={:<4} horizons={:?} gaps={} rebound={} \
                 horizon_profiles={} seasonality={}",
                profile.min_observations,
                profile.horizons,
                profile.gap_stats,
                profile.rebound,
                profile.horizon_profiles,
                profile.seasonality,
            );
        }
    }
    Ok(())
}
