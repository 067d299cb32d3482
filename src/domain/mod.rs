//! Domain Layer - The return-regime analytics core
//!
//! Pure statistical transformations with no I/O and no async. Everything
//! here is deterministic, request-scoped and single-threaded: a price
//! series goes in, derived statistics come out, nothing persists.
//!
//! Pipeline, left to right:
//! - `series`: prices -> daily simple returns
//! - `thresholds`: returns -> volatility-scaled drop thresholds
//! - `events`: returns + threshold -> events, recency, gap statistics
//! - `rebound`: next-day rebound probability after drops
//! - `horizon`: forward-return profiles after drops
//! - `seasonality`: weekday / day-of-month / month mean returns
//! - `regime`: recency of severe drops -> qualitative label
//! - `analysis`: the configurable entry point bundling all of the above

pub mod analysis;
pub mod events;
pub mod horizon;
pub mod rebound;
pub mod regime;
pub mod seasonality;
pub mod series;
pub mod thresholds;

pub use analysis::{
    analyze, AnalysisError, AnalysisProfile, AnalysisResult, TierReport, DEFAULT_HORIZONS,
    DEFAULT_MIN_OBSERVATIONS,
};
pub use events::{days_since_last_event, detect_events, GapStats};
pub use horizon::{horizon_profile, HorizonStats};
pub use rebound::{next_day_rebound, ReboundStats};
pub use regime::{classify, RegimeLabel};
pub use seasonality::{weekday_name, Seasonality};
pub use series::{PricePoint, PriceSeries, ReturnPoint, ReturnSeries, SeriesError};
pub use thresholds::{ReturnMoments, Severity, ThresholdSet};
