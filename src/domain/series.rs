//! Price and Return Series
//!
//! Builders for the two fundamental series of the analysis pipeline:
//! - `PriceSeries`: ordered (date, close) observations as delivered by the
//!   market data port
//! - `ReturnSeries`: daily simple returns derived from consecutive closes
//!
//! Both series enforce strictly increasing dates. Returns are simple
//! (`p[i]/p[i-1] - 1`), not log returns, and non-finite values are dropped
//! at construction rather than imputed.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::analysis::AnalysisError;

/// Errors raised while constructing a price series
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("price at {date} must be positive and finite, got {close}")]
    InvalidPrice { date: NaiveDate, close: f64 },

    #[error("dates must be strictly increasing, violated at {date}")]
    OutOfOrderDate { date: NaiveDate },
}

/// A single daily closing price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Ordered daily closing prices for one ticker
///
/// Immutable once built. Dates are strictly increasing and every close is
/// positive and finite; construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a validated price series from raw observations
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        let mut prev_date: Option<NaiveDate> = None;
        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    date: point.date,
                    close: point.close,
                });
            }
            if let Some(prev) = prev_date {
                if point.date <= prev {
                    return Err(SeriesError::OutOfOrderDate { date: point.date });
                }
            }
            prev_date = Some(point.date);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the observation on `date`, if present
    ///
    /// Dates are strictly increasing so binary search applies.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.points.binary_search_by_key(&date, |p| p.date).ok()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// A single daily return observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub ret: f64,
}

/// Ordered daily simple returns derived from a price series
///
/// One element shorter than the source prices: the first price has no
/// predecessor and therefore no return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Derive daily simple returns from a price series
    ///
    /// Fails with `AnalysisError::InsufficientData` when fewer than
    /// `min_observations` returns survive: mean, stdev and tail-event
    /// counts are unreliable on short histories.
    pub fn from_prices(
        prices: &PriceSeries,
        min_observations: usize,
    ) -> Result<Self, AnalysisError> {
        let mut points = Vec::with_capacity(prices.len().saturating_sub(1));
        for pair in prices.points().windows(2) {
            let ret = pair[1].close / pair[0].close - 1.0;
            // Prices are validated positive, but guard against overflow anyway
            if ret.is_finite() {
                points.push(ReturnPoint {
                    date: pair[1].date,
                    ret,
                });
            }
        }

        if points.len() < min_observations {
            return Err(AnalysisError::InsufficientData {
                min_required: min_observations,
                actual: points.len(),
            });
        }

        Ok(Self { points })
    }

    /// Build directly from return observations
    ///
    /// Callers must supply strictly increasing dates; used by the analyzers'
    /// unit tests and by callers that already hold validated returns.
    pub fn from_points(points: Vec<ReturnPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.ret)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&ReturnPoint> {
        self.points.last()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn series(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(date(i as u32 + 1), close))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn test_price_series_rejects_non_positive_close() {
        let points = vec![PricePoint::new(date(1), 100.0), PricePoint::new(date(2), 0.0)];
        let result = PriceSeries::new(points);
        assert!(matches!(result, Err(SeriesError::InvalidPrice { .. })));
    }

    #[test]
    fn test_price_series_rejects_out_of_order_dates() {
        let points = vec![
            PricePoint::new(date(2), 100.0),
            PricePoint::new(date(1), 101.0),
        ];
        let result = PriceSeries::new(points);
        assert!(matches!(result, Err(SeriesError::OutOfOrderDate { .. })));
    }

    #[test]
    fn test_price_series_rejects_duplicate_dates() {
        let points = vec![
            PricePoint::new(date(1), 100.0),
            PricePoint::new(date(1), 101.0),
        ];
        assert!(PriceSeries::new(points).is_err());
    }

    #[test]
    fn test_position_lookup() {
        let prices = series(&[100.0, 101.0, 102.0]);
        assert_eq!(prices.position(date(2)), Some(1));
        assert_eq!(prices.position(date(9)), None);
    }

    #[test]
    fn test_returns_one_shorter_than_prices() {
        let prices = series(&[100.0, 102.0, 99.0, 95.0]);
        let returns = ReturnSeries::from_prices(&prices, 0).unwrap();
        assert_eq!(returns.len(), 3);
        // First return belongs to the second price date
        assert_eq!(returns.points()[0].date, date(2));
    }

    #[test]
    fn test_simple_return_values() {
        let prices = series(&[100.0, 102.0, 99.0]);
        let returns = ReturnSeries::from_prices(&prices, 0).unwrap();
        assert_relative_eq!(returns.points()[0].ret, 0.02, epsilon = 1e-12);
        assert_relative_eq!(returns.points()[1].ret, 99.0 / 102.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_insufficient_data_reports_counts() {
        let prices = series(&[100.0, 101.0, 102.0]);
        let err = ReturnSeries::from_prices(&prices, 50).unwrap_err();
        match err {
            AnalysisError::InsufficientData {
                min_required,
                actual,
            } => {
                assert_eq!(min_required, 50);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_price_series_is_valid_but_yields_no_returns() {
        let prices = PriceSeries::new(Vec::new()).unwrap();
        assert!(prices.is_empty());
        let err = ReturnSeries::from_prices(&prices, 1).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { actual: 0, .. }));
    }
}
