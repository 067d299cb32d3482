//! Stooq Market Data Adapter
//!
//! Fetches historical daily OHLC data from the Stooq CSV endpoint and
//! reduces it to the (date, close) series the analysis core consumes.
//! Rows are returned oldest first as `Date,Open,High,Low,Close,Volume`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;

use crate::domain::series::{PricePoint, PriceSeries};
use crate::ports::market_data::{MarketDataError, MarketDataPort};

const STOOQ_DAILY_URL: &str = "https://stooq.com/q/d/l/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the Stooq daily-quotes CSV endpoint
#[derive(Debug, Clone)]
pub struct StooqClient {
    http: Client,
    base_url: String,
}

impl StooqClient {
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(STOOQ_DAILY_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Point the client at a different endpoint, e.g. a local stub in tests
    pub fn with_base_url(base_url: &str, timeout_seconds: u64) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| MarketDataError::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataPort for StooqClient {
    async fn fetch_daily_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        let end = Utc::now().date_naive();
        let url = format!(
            "{}?s={}&d1={}&d2={}&i=d",
            self.base_url,
            ticker.to_lowercase(),
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        );

        tracing::debug!(ticker, %start, "requesting daily quotes");

        let body = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketDataError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| MarketDataError::Http(e.to_string()))?
            .text()
            .await
            .map_err(|e| MarketDataError::Http(e.to_string()))?;

        let points = parse_daily_csv(&body)?;
        if points.is_empty() {
            return Err(MarketDataError::NoData {
                ticker: ticker.to_string(),
            });
        }

        tracing::debug!(ticker, rows = points.len(), "daily quotes received");

        PriceSeries::new(points).map_err(|e| MarketDataError::Parse(e.to_string()))
    }
}

/// Parse a Stooq daily CSV body into price points
///
/// The endpoint answers "No data" (no header) for unknown tickers; that
/// and an empty body both yield an empty vector, which the caller maps to
/// `NoData`. A present-but-malformed row is a parse error, not a skip.
fn parse_daily_csv(body: &str) -> Result<Vec<PricePoint>, MarketDataError> {
    let mut lines = body.lines();

    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    if !header.starts_with("Date,") {
        return Ok(Vec::new());
    }

    let mut points = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 5 {
            return Err(MarketDataError::Parse(format!(
                "expected at least 5 CSV fields, got {} in row '{line}'",
                fields.len()
            )));
        }

        let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
            .map_err(|e| MarketDataError::Parse(format!("bad date '{}': {e}", fields[0])))?;
        let close: f64 = fields[4]
            .parse()
            .map_err(|e| MarketDataError::Parse(format!("bad close '{}': {e}", fields[4])))?;

        points.push(PricePoint::new(date, close));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(StooqClient::new().is_ok());
    }

    #[test]
    fn test_parse_valid_csv() {
        let body = "Date,Open,High,Low,Close,Volume\n\
                    2024-01-02,185.4,186.1,184.2,185.6,1000000\n\
                    2024-01-03,185.8,187.0,185.0,186.2,900000\n";
        let points = parse_daily_csv(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(
            points[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(points[0].close, 185.6);
        assert_eq!(points[1].close, 186.2);
    }

    #[test]
    fn test_parse_no_data_body() {
        assert!(parse_daily_csv("No data").unwrap().is_empty());
        assert!(parse_daily_csv("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-02,185.4\n";
        let err = parse_daily_csv(body).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_bad_close() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,3,N/D,0\n";
        let err = parse_daily_csv(body).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let body = "Date,Open,High,Low,Close,Volume\n02/01/2024,1,2,3,4,0\n";
        assert!(parse_daily_csv(body).is_err());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,3,4,0\n\n";
        assert_eq!(parse_daily_csv(body).unwrap().len(), 1);
    }
}
