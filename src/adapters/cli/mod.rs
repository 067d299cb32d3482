//! CLI Adapter
//!
//! Command-line interface for tailscope, built on clap derive macros.

mod commands;

pub use commands::{AnalyzeCmd, CliApp, Command};
