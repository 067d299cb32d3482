//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section has
//! sensible defaults so the binary also runs without a config file.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::analysis::{AnalysisProfile, DEFAULT_MIN_OBSERVATIONS};

const DEFAULT_BASE_URL: &str = "https://stooq.com/q/d/l/";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Analysis configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSection {
    /// Named profile preset: standard, quick, risk, calendar
    pub profile: String,
    /// Override of the preset's minimum return observations
    #[serde(default)]
    pub min_observations: Option<usize>,
    /// Override of the preset's forward horizons (trading days)
    #[serde(default)]
    pub horizons: Option<Vec<usize>>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            profile: "standard".to_string(),
            min_observations: None,
            horizons: None,
        }
    }
}

/// Market data provider section
#[derive(Debug, Clone, Deserialize)]
pub struct DataSection {
    /// Daily-quotes CSV endpoint
    pub base_url: String,
    /// HTTP request timeout
    pub timeout_seconds: u64,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if AnalysisProfile::named(&self.analysis.profile).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "unknown analysis profile '{}', expected one of {:?}",
                self.analysis.profile,
                AnalysisProfile::PRESETS
            )));
        }

        if let Some(min) = self.analysis.min_observations {
            if min < 2 {
                return Err(ConfigError::ValidationError(format!(
                    "min_observations must be at least 2, got {min}"
                )));
            }
        }

        if let Some(horizons) = &self.analysis.horizons {
            if horizons.is_empty() {
                return Err(ConfigError::ValidationError(
                    "horizons cannot be empty".to_string(),
                ));
            }
            if horizons.contains(&0) {
                return Err(ConfigError::ValidationError(
                    "horizons must be positive trading-day offsets".to_string(),
                ));
            }
        }

        if self.data.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if self.data.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_seconds must be > 0".to_string(),
            ));
        }

        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log level must be one of {LEVELS:?}, got '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Resolve the analysis profile, optionally overridden by name
    ///
    /// The CLI's `--profile` beats the config's preset name; the config's
    /// min_observations and horizons overrides apply either way.
    pub fn analysis_profile(
        &self,
        override_name: Option<&str>,
    ) -> Result<AnalysisProfile, ConfigError> {
        let name = override_name.unwrap_or(&self.analysis.profile);
        let mut profile = AnalysisProfile::named(name).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "unknown analysis profile '{name}', expected one of {:?}",
                AnalysisProfile::PRESETS
            ))
        })?;

        if let Some(min) = self.analysis.min_observations {
            profile.min_observations = min;
        }
        if let Some(horizons) = &self.analysis.horizons {
            profile.horizons = horizons.clone();
        }

        Ok(profile)
    }
}
