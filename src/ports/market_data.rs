//! Market Data Port
//!
//! The single external dependency of the analysis pipeline: something that
//! can deliver historical daily closing prices for a ticker from a start
//! date onward. The core never retries; whatever failure the provider
//! reports is terminal for that analysis request.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::series::PriceSeries;

/// Market data errors
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Provider returned no usable rows for the ticker/date range
    #[error("no price data available for {ticker}")]
    NoData { ticker: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("response parse error: {0}")]
    Parse(String),
}

/// Port for fetching historical daily prices
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch daily closing prices for `ticker` from `start` through today
    ///
    /// The returned series is ordered, strictly increasing by date, with
    /// positive closes; fails with `MarketDataError::NoData` when the
    /// provider returns nothing usable.
    async fn fetch_daily_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError>;
}
