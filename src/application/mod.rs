//! Application Layer - Use-case orchestration
//!
//! Wires the market data port into the pure analysis core.

pub mod orchestrator;

pub use orchestrator::{AnalysisOrchestrator, PipelineError};
