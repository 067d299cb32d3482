//! Analysis Pipeline
//!
//! The single configurable entry point of the core. Earlier iterations of
//! this tool were several near-duplicate scripts that each computed a
//! slightly different subset of statistics; here one `analyze` function
//! runs the full pipeline and an `AnalysisProfile` selects the subset.
//!
//! The pipeline is pure and synchronous: an immutable price series goes in,
//! a fully derived `AnalysisResult` comes out, and nothing is shared or
//! cached between invocations. Running it twice on the same input yields a
//! bit-identical result.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::events::{days_since_last_event, detect_events, GapStats};
use crate::domain::horizon::{horizon_profile, HorizonStats};
use crate::domain::rebound::{next_day_rebound, ReboundStats};
use crate::domain::regime::{classify, RegimeLabel};
use crate::domain::seasonality::Seasonality;
use crate::domain::series::{PriceSeries, ReturnSeries};
use crate::domain::thresholds::{ReturnMoments, Severity, ThresholdSet};

/// Default minimum number of return observations
pub const DEFAULT_MIN_OBSERVATIONS: usize = 100;
/// Default forward horizons in trading days
pub const DEFAULT_HORIZONS: [usize; 3] = [5, 10, 15];

/// Terminal errors of the analysis core
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {min_required} return observations, got {actual}")]
    InsufficientData { min_required: usize, actual: usize },

    #[error("invalid analysis profile: {0}")]
    InvalidProfile(String),
}

/// Which statistics an analysis run computes
///
/// Recency is always computed since the regime label depends on it. The
/// remaining components can be switched off, in which case the matching
/// result fields are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisProfile {
    /// Minimum return observations required before analysis proceeds
    pub min_observations: usize,
    /// Forward horizons in trading days for post-event profiles
    pub horizons: Vec<usize>,
    /// Compute inter-event gap statistics per tier
    pub gap_stats: bool,
    /// Compute next-day rebound probability per tier
    pub rebound: bool,
    /// Compute post-event forward-return profiles per tier
    pub horizon_profiles: bool,
    /// Compute calendar seasonality over the full return series
    pub seasonality: bool,
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl AnalysisProfile {
    /// Everything on; the full report
    pub fn standard() -> Self {
        Self {
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            horizons: DEFAULT_HORIZONS.to_vec(),
            gap_stats: true,
            rebound: true,
            horizon_profiles: true,
            seasonality: true,
        }
    }

    /// Shorter history requirement, recency and rebound only
    pub fn quick() -> Self {
        Self {
            min_observations: 50,
            horizon_profiles: false,
            seasonality: false,
            ..Self::standard()
        }
    }

    /// Tail-risk statistics without the calendar breakdown
    pub fn risk() -> Self {
        Self {
            seasonality: false,
            ..Self::standard()
        }
    }

    /// Calendar breakdown without the forward-return profiles
    pub fn calendar() -> Self {
        Self {
            horizon_profiles: false,
            ..Self::standard()
        }
    }

    /// Look up a preset by name
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "quick" => Some(Self::quick()),
            "risk" => Some(Self::risk()),
            "calendar" => Some(Self::calendar()),
            _ => None,
        }
    }

    /// Names of all presets
    pub const PRESETS: [&'static str; 4] = ["standard", "quick", "risk", "calendar"];

    /// Reject profiles the pipeline cannot run
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.min_observations < 2 {
            return Err(AnalysisError::InvalidProfile(format!(
                "min_observations must be at least 2, got {}",
                self.min_observations
            )));
        }
        if self.horizon_profiles {
            if self.horizons.is_empty() {
                return Err(AnalysisError::InvalidProfile(
                    "horizon profiles enabled but no horizons configured".to_string(),
                ));
            }
            if self.horizons.contains(&0) {
                return Err(AnalysisError::InvalidProfile(
                    "horizons must be positive trading-day offsets".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Statistics for one severity tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierReport {
    pub severity: Severity,
    /// The threshold the tier's events were detected against
    pub threshold: f64,
    pub event_count: usize,
    /// Calendar days since the last event; `None` means never
    pub days_since_last: Option<i64>,
    pub rebound: Option<ReboundStats>,
    pub gaps: Option<GapStats>,
    pub horizons: Option<BTreeMap<usize, HorizonStats>>,
}

/// The full output bundle of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Number of return observations analyzed
    pub sample_count: usize,
    /// Sample mean of daily returns
    pub mean_return: f64,
    /// Sample standard deviation (ddof = 1) of daily returns
    pub std_dev: f64,
    /// Most recent daily return
    pub last_return: f64,
    /// Smallest daily return observed
    pub min_return: f64,
    /// Largest daily return observed
    pub max_return: f64,
    pub thresholds: ThresholdSet,
    /// Per-tier statistics, mildest tier first
    pub tiers: Vec<TierReport>,
    pub seasonality: Option<Seasonality>,
    pub regime: RegimeLabel,
}

impl AnalysisResult {
    /// Tier report for a severity, if present
    pub fn tier(&self, severity: Severity) -> Option<&TierReport> {
        self.tiers.iter().find(|t| t.severity == severity)
    }
}

/// Run the full analysis pipeline over a price series
///
/// Either the complete result is produced or a single terminal error is
/// returned; there is no partial-result recovery.
pub fn analyze(
    prices: &PriceSeries,
    profile: &AnalysisProfile,
) -> Result<AnalysisResult, AnalysisError> {
    profile.validate()?;

    let returns = ReturnSeries::from_prices(prices, profile.min_observations)?;

    let moments = ReturnMoments::of(&returns);
    let thresholds = ThresholdSet::from_moments(&moments);

    let mut tiers = Vec::with_capacity(Severity::ALL.len());
    let mut recency_by_tier: BTreeMap<Severity, Option<i64>> = BTreeMap::new();

    for severity in Severity::ALL {
        let threshold = thresholds.get(severity);
        let events = detect_events(&returns, threshold);
        let days_since_last = days_since_last_event(&returns, &events);
        recency_by_tier.insert(severity, days_since_last);

        let rebound = profile
            .rebound
            .then(|| next_day_rebound(&returns, threshold));
        let gaps = profile.gap_stats.then(|| GapStats::from_events(&events));
        let horizons = profile
            .horizon_profiles
            .then(|| horizon_profile(prices, &events, &profile.horizons));

        tiers.push(TierReport {
            severity,
            threshold,
            event_count: events.len(),
            days_since_last,
            rebound,
            gaps,
            horizons,
        });
    }

    let seasonality = profile
        .seasonality
        .then(|| Seasonality::from_returns(&returns));

    let regime = classify(
        recency_by_tier[&Severity::VeryStrong],
        recency_by_tier[&Severity::Strong],
    );

    // min_observations >= 2 guarantees the series is non-empty here
    let last_return = returns.last().map(|p| p.ret).unwrap_or(0.0);
    let (min_return, max_return) = returns
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r), hi.max(r))
        });

    Ok(AnalysisResult {
        sample_count: returns.len(),
        mean_return: moments.mu,
        std_dev: moments.sigma,
        last_return,
        min_return,
        max_return,
        thresholds,
        tiers,
        seasonality,
        regime,
    })
}
