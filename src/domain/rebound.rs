//! Next-Day Rebound Probability
//!
//! For a given drop threshold, estimates how often the return on the day
//! immediately following a drop event was strictly positive. An event on
//! the series' final date has no next day and is excluded from the sample.

use serde::Serialize;

use crate::domain::series::ReturnSeries;

/// Rebound probability and the sample it was measured on
///
/// `probability` is `None` (not 0) when no event has a following day to
/// evaluate, which downstream must keep distinct from a measured 0% rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReboundStats {
    pub probability: Option<f64>,
    pub sample_count: usize,
}

/// Fraction of drop events whose next-day return was strictly positive
pub fn next_day_rebound(returns: &ReturnSeries, threshold: f64) -> ReboundStats {
    let points = returns.points();
    let mut sample_count = 0usize;
    let mut positive = 0usize;

    // The last index has no next day, so stop one short
    for i in 0..points.len().saturating_sub(1) {
        if points[i].ret <= threshold {
            sample_count += 1;
            if points[i + 1].ret > 0.0 {
                positive += 1;
            }
        }
    }

    let probability = if sample_count == 0 {
        None
    } else {
        Some(positive as f64 / sample_count as f64)
    };

    ReboundStats {
        probability,
        sample_count,
    }
}
