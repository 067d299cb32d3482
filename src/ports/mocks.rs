//! Mock port implementations for tests
//!
//! Deterministic, in-memory market data with call recording. No network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::series::{PricePoint, PriceSeries};
use crate::ports::market_data::{MarketDataError, MarketDataPort};

/// Mock market data port backed by preloaded price series
#[derive(Debug, Default)]
pub struct MockMarketData {
    calls: Arc<Mutex<Vec<String>>>,
    series: HashMap<String, Vec<PricePoint>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to preload a series for a ticker
    pub fn with_series(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.series.insert(ticker.to_string(), points);
        self
    }

    /// Builder method to preload daily closes starting at `start`
    pub fn with_closes(self, ticker: &str, start: NaiveDate, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + chrono::Days::new(i as u64), close))
            .collect();
        self.with_series(ticker, points)
    }

    /// Tickers requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn fetch_daily_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        self.calls.lock().unwrap().push(ticker.to_string());

        let points: Vec<PricePoint> = self
            .series
            .get(ticker)
            .map(|all| all.iter().copied().filter(|p| p.date >= start).collect())
            .unwrap_or_default();

        if points.is_empty() {
            return Err(MarketDataError::NoData {
                ticker: ticker.to_string(),
            });
        }

        PriceSeries::new(points).map_err(|e| MarketDataError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_mock_returns_preloaded_series() {
        let mock = MockMarketData::new().with_closes("ACME", date(1), &[100.0, 101.0, 99.0]);
        let series = tokio_test::block_on(mock.fetch_daily_prices("ACME", date(1))).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(mock.calls(), vec!["ACME".to_string()]);
    }

    #[test]
    fn test_mock_filters_by_start_date() {
        let mock = MockMarketData::new().with_closes("ACME", date(1), &[100.0, 101.0, 99.0]);
        let series = tokio_test::block_on(mock.fetch_daily_prices("ACME", date(3))).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].close, 99.0);
    }

    #[test]
    fn test_mock_unknown_ticker_is_no_data() {
        let mock = MockMarketData::new();
        let err = tokio_test::block_on(mock.fetch_daily_prices("NOPE", date(1))).unwrap_err();
        assert!(matches!(err, MarketDataError::NoData { .. }));
    }
}
