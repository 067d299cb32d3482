//! Analysis Orchestrator
//!
//! Glues the market data port to the pure analysis pipeline: fetch the
//! price history, run `analyze`, hand the bundle back. Each run allocates
//! its own series and derived structures; nothing is cached or shared
//! between requests, so concurrent runs for different tickers never touch
//! common state.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::analysis::{analyze, AnalysisError, AnalysisProfile, AnalysisResult};
use crate::ports::market_data::{MarketDataError, MarketDataPort};

/// Terminal failures of one analysis request
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Data(#[from] MarketDataError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Runs the fetch -> analyze pipeline for one ticker at a time
pub struct AnalysisOrchestrator<P: MarketDataPort> {
    market_data: P,
    profile: AnalysisProfile,
}

impl<P: MarketDataPort> AnalysisOrchestrator<P> {
    pub fn new(market_data: P, profile: AnalysisProfile) -> Self {
        Self {
            market_data,
            profile,
        }
    }

    pub fn profile(&self) -> &AnalysisProfile {
        &self.profile
    }

    /// Fetch daily prices and run the full analysis
    ///
    /// No retries: an upstream failure is terminal for the request, and
    /// retry policy (if any) belongs to the data provider side.
    pub async fn run(
        &self,
        ticker: &str,
        start: NaiveDate,
    ) -> Result<AnalysisResult, PipelineError> {
        tracing::info!(ticker, %start, "fetching daily price history");
        let prices = self.market_data.fetch_daily_prices(ticker, start).await?;
        tracing::info!(ticker, rows = prices.len(), "price history fetched");

        let result = analyze(&prices, &self.profile)?;
        tracing::info!(
            ticker,
            returns = result.sample_count,
            regime = %result.regime,
            "analysis complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::regime::RegimeLabel;
    use crate::ports::mocks::MockMarketData;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn relaxed_profile() -> AnalysisProfile {
        AnalysisProfile {
            min_observations: 2,
            ..AnalysisProfile::standard()
        }
    }

    #[test]
    fn test_run_full_pipeline() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.31).sin() * 2.0)
            .collect();
        let mock = MockMarketData::new().with_closes("ACME", start(), &closes);
        let orchestrator = AnalysisOrchestrator::new(mock, relaxed_profile());

        let result = tokio_test::block_on(orchestrator.run("ACME", start())).unwrap();
        assert_eq!(result.sample_count, 59);
        assert!(result.thresholds.moderate >= result.thresholds.very_strong);
        assert_eq!(orchestrator.market_data.calls(), vec!["ACME".to_string()]);
    }

    #[test]
    fn test_run_propagates_no_data() {
        let mock = MockMarketData::new();
        let orchestrator = AnalysisOrchestrator::new(mock, relaxed_profile());

        let err = tokio_test::block_on(orchestrator.run("NOPE", start())).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Data(MarketDataError::NoData { .. })
        ));
    }

    #[test]
    fn test_run_propagates_insufficient_data() {
        let mock = MockMarketData::new().with_closes("ACME", start(), &[100.0, 101.0]);
        let orchestrator =
            AnalysisOrchestrator::new(mock, AnalysisProfile::standard());

        let err = tokio_test::block_on(orchestrator.run("ACME", start())).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Analysis(AnalysisError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_stable_regime_on_quiet_history() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + ((i % 2) as f64) * 0.1).collect();
        let mock = MockMarketData::new().with_closes("CALM", start(), &closes);
        let orchestrator = AnalysisOrchestrator::new(mock, relaxed_profile());

        let result = tokio_test::block_on(orchestrator.run("CALM", start())).unwrap();
        assert_eq!(result.regime, RegimeLabel::Stable);
    }
}
