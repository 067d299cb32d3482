//! Ports Layer - Trait definitions for external dependencies
//!
//! The analysis core has exactly one external dependency: a source of
//! historical daily prices. The trait here abstracts it so the pipeline
//! can run against the real provider or a deterministic mock.

pub mod market_data;
pub mod mocks;

pub use market_data::{MarketDataError, MarketDataPort};
pub use mocks::MockMarketData;
