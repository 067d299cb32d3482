//! Regime Classification
//!
//! Collapses the recency of strong and very-strong drop events into a
//! coarse qualitative label. Purely a function of the two recency values;
//! no state is kept between calls.

use std::fmt;

use serde::Serialize;

/// Days within which a severe drop keeps the regime flagged
const RECENT_WINDOW_DAYS: i64 = 30;

/// Qualitative tail-risk regime for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeLabel {
    /// No strong or very-strong drop inside the recent window
    Stable,
    /// A strong drop inside the recent window, but no very-strong one
    Elevated,
    /// A very-strong drop inside the recent window
    HighRisk,
}

impl fmt::Display for RegimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RegimeLabel::Stable => "stable",
            RegimeLabel::Elevated => "elevated",
            RegimeLabel::HighRisk => "high risk",
        };
        write!(f, "{label}")
    }
}

/// Classify the regime from strong / very-strong drop recency
///
/// Rules evaluated in order, first match wins. `None` recency means the
/// event never happened over the observed history and never satisfies the
/// window test: an asset with no very-strong drop on record is not
/// high-risk by that rule alone.
pub fn classify(
    very_strong_recency: Option<i64>,
    strong_recency: Option<i64>,
) -> RegimeLabel {
    if within_window(very_strong_recency) {
        RegimeLabel::HighRisk
    } else if within_window(strong_recency) {
        RegimeLabel::Elevated
    } else {
        RegimeLabel::Stable
    }
}

fn within_window(recency: Option<i64>) -> bool {
    matches!(recency, Some(days) if days < RECENT_WINDOW_DAYS)
}
