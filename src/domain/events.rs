//! Drop Event Detection, Recency and Gap Statistics
//!
//! A drop event is a day whose return is at or below a severity threshold
//! (inclusive comparison: a return exactly equal to the threshold counts).
//! On top of the event set this module measures:
//!
//! - recency: calendar days between the most recent event and the last
//!   observed date of the series
//! - gaps: calendar days between consecutive events of the same tier

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::series::ReturnSeries;

/// Dates whose return is at or below `threshold`, ascending
pub fn detect_events(returns: &ReturnSeries, threshold: f64) -> Vec<NaiveDate> {
    returns
        .points()
        .iter()
        .filter(|p| p.ret <= threshold)
        .map(|p| p.date)
        .collect()
}

/// Calendar days since the most recent event
///
/// `None` means the event never happened over the observed history, which
/// is distinct from an event on the final date (0 days). Events are not
/// assumed to include the series' final date.
pub fn days_since_last_event(returns: &ReturnSeries, events: &[NaiveDate]) -> Option<i64> {
    let last_event = events.last()?;
    let last_date = returns.last_date()?;
    Some((last_date - *last_event).num_days())
}

/// Inter-event gap statistics for one severity tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapStats {
    /// Number of events in the tier
    pub event_count: usize,
    /// Mean gap in calendar days; undefined with fewer than 2 events
    pub mean_gap_days: Option<f64>,
    /// Up to the 3 most recent gaps, oldest first
    pub last_gaps: Vec<i64>,
}

impl GapStats {
    /// Maximum number of recent gaps reported
    const RECENT_GAPS: usize = 3;

    /// Compute gap statistics over an ordered event set
    pub fn from_events(events: &[NaiveDate]) -> Self {
        let gaps: Vec<i64> = events
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days())
            .collect();

        let mean_gap_days = if gaps.is_empty() {
            None
        } else {
            Some(gaps.iter().sum::<i64>() as f64 / gaps.len() as f64)
        };

        let last_gaps = gaps[gaps.len().saturating_sub(Self::RECENT_GAPS)..].to_vec();

        Self {
            event_count: events.len(),
            mean_gap_days,
            last_gaps,
        }
    }
}
