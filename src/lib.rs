#![allow(dead_code, unused_imports)]
//! Tailscope - Drawdown Regime Analyzer Library
//!
//! Characterizes the statistical drawdown regime of a single asset's daily
//! returns: volatility-scaled drop thresholds, event recency and gaps,
//! next-day rebound odds, post-event forward-return profiles, calendar
//! seasonality and a coarse regime label.
//!
//! # Modules
//!
//! - `domain`: The pure analytics core (series, thresholds, events,
//!   rebound, horizon, seasonality, regime, analysis)
//! - `ports`: Trait abstraction over the market data provider
//! - `adapters`: External implementations (Stooq client, CLI, report)
//! - `config`: Configuration loading and validation
//! - `application`: The fetch -> analyze orchestrator

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
