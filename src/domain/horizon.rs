//! Post-Event Forward-Return Profiles
//!
//! For each drop event and each forward horizon h (in trading days),
//! measures the cumulative return from the event day's close to the close
//! h observations later, then aggregates per horizon:
//!
//! - probability that the forward return was positive
//! - mean of the positive outcomes (the "gain" subset)
//! - mean of the negative outcomes (the "loss" subset)
//!
//! Exactly-zero outcomes count toward the probability denominator but are
//! excluded from both the gain and loss subsets. Events too close to the
//! end of the series for a horizon, or absent from the price index, are
//! silently skipped rather than treated as zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::series::PriceSeries;

/// Aggregated forward-return outcomes for one horizon
///
/// `sample_count == 0` is the explicit no-data marker: all aggregates are
/// `None` and the horizon simply had no evaluable events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizonStats {
    /// Number of events with enough trailing data for this horizon
    pub sample_count: usize,
    /// Fraction of outcomes strictly above zero
    pub prob_positive: Option<f64>,
    /// Mean forward return over the positive-outcome subset
    pub mean_gain: Option<f64>,
    /// Mean forward return over the negative-outcome subset
    pub mean_loss: Option<f64>,
}

impl HorizonStats {
    fn from_outcomes(outcomes: &[f64]) -> Self {
        if outcomes.is_empty() {
            return Self {
                sample_count: 0,
                prob_positive: None,
                mean_gain: None,
                mean_loss: None,
            };
        }

        let gains: Vec<f64> = outcomes.iter().copied().filter(|r| *r > 0.0).collect();
        let losses: Vec<f64> = outcomes.iter().copied().filter(|r| *r < 0.0).collect();

        let mean = |subset: &[f64]| {
            if subset.is_empty() {
                None
            } else {
                Some(subset.iter().sum::<f64>() / subset.len() as f64)
            }
        };

        Self {
            sample_count: outcomes.len(),
            prob_positive: Some(gains.len() as f64 / outcomes.len() as f64),
            mean_gain: mean(&gains),
            mean_loss: mean(&losses),
        }
    }
}

/// Forward-return aggregates per horizon for one event set
///
/// Every horizon in `horizons` gets an entry; empty samples are reported
/// as zero-count stats, never fabricated outcomes.
pub fn horizon_profile(
    prices: &PriceSeries,
    events: &[NaiveDate],
    horizons: &[usize],
) -> BTreeMap<usize, HorizonStats> {
    let points = prices.points();
    let mut profile = BTreeMap::new();

    for &h in horizons {
        let mut outcomes = Vec::new();
        for &event_date in events {
            // Events may exist in the return series without a matching
            // price row; those are skipped along with out-of-bounds ones.
            let Some(idx) = prices.position(event_date) else {
                continue;
            };
            let Some(forward) = points.get(idx + h) else {
                continue;
            };
            outcomes.push(forward.close / points[idx].close - 1.0);
        }
        profile.insert(h, HorizonStats::from_outcomes(&outcomes));
    }

    profile
}
