//! Adapters Layer - External System Implementations
//!
//! Implementations at the core's boundary:
//! - Stooq: daily-quotes CSV client implementing the market data port
//! - CLI: command-line argument surface
//! - Report: plain-text rendering of analysis results

pub mod cli;
pub mod report;
pub mod stooq;

pub use cli::CliApp;
pub use report::render_report;
pub use stooq::StooqClient;
