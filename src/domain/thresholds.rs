//! Severity Thresholds
//!
//! Volatility-scaled drop thresholds derived once per return series:
//!
//! - moderate    = μ − 1σ
//! - strong      = μ − 2σ
//! - very strong = μ − 3σ
//!
//! μ and σ are the sample mean and sample standard deviation (ddof = 1) of
//! the daily returns, matching conventional statistical tooling. Since
//! σ ≥ 0, thresholds always satisfy moderate ≥ strong ≥ very_strong.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::domain::series::ReturnSeries;

/// Severity tier of a drop event
///
/// Tiers nest by construction: every very-strong drop is also a strong
/// drop, and every strong drop is also a moderate drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Moderate,
    Strong,
    VeryStrong,
}

impl Severity {
    /// All tiers, mildest first
    pub const ALL: [Severity; 3] = [Severity::Moderate, Severity::Strong, Severity::VeryStrong];

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Moderate => "moderate (mu - 1 sigma)",
            Severity::Strong => "strong (mu - 2 sigma)",
            Severity::VeryStrong => "very strong (mu - 3 sigma)",
        }
    }
}

/// Sample mean and standard deviation of a return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnMoments {
    /// Sample mean of daily returns
    pub mu: f64,
    /// Sample standard deviation (ddof = 1) of daily returns
    pub sigma: f64,
}

impl ReturnMoments {
    /// Compute moments over all returns in the series
    ///
    /// A single observation has no sample variance; σ is 0.0 in that case
    /// so the thresholds degenerate to three copies of μ instead of NaN.
    pub fn of(returns: &ReturnSeries) -> Self {
        let values: Vec<f64> = returns.values().collect();
        let mu = (&values[..]).mean();
        let sigma = if values.len() < 2 {
            0.0
        } else {
            (&values[..]).std_dev()
        };
        Self { mu, sigma }
    }
}

/// The three drop thresholds for one return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSet {
    pub moderate: f64,
    pub strong: f64,
    pub very_strong: f64,
}

impl ThresholdSet {
    /// Derive thresholds from precomputed moments
    pub fn from_moments(moments: &ReturnMoments) -> Self {
        Self {
            moderate: moments.mu - moments.sigma,
            strong: moments.mu - 2.0 * moments.sigma,
            very_strong: moments.mu - 3.0 * moments.sigma,
        }
    }

    /// Threshold value for a severity tier
    pub fn get(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Moderate => self.moderate,
            Severity::Strong => self.strong,
            Severity::VeryStrong => self.very_strong,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::ReturnPoint;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn returns(values: &[f64]) -> ReturnSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &ret)| ReturnPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new(i as u64),
                ret,
            })
            .collect();
        ReturnSeries::from_points(points)
    }

    #[test]
    fn test_sample_moments() {
        let series = returns(&[0.01, -0.02, 0.03, -0.04]);
        let moments = ReturnMoments::of(&series);
        assert_relative_eq!(moments.mu, -0.005, epsilon = 1e-12);
        // Sample variance with ddof = 1
        let expected_var = [0.01f64, -0.02, 0.03, -0.04]
            .iter()
            .map(|r| (r + 0.005) * (r + 0.005))
            .sum::<f64>()
            / 3.0;
        assert_relative_eq!(moments.sigma, expected_var.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_ordering() {
        let series = returns(&[0.02, -0.01, 0.005, -0.03, 0.01, 0.0]);
        let moments = ReturnMoments::of(&series);
        let thresholds = ThresholdSet::from_moments(&moments);
        assert!(thresholds.moderate >= thresholds.strong);
        assert!(thresholds.strong >= thresholds.very_strong);
    }

    #[test]
    fn test_zero_sigma_collapses_thresholds() {
        let series = returns(&[0.01, 0.01, 0.01, 0.01]);
        let moments = ReturnMoments::of(&series);
        assert_relative_eq!(moments.sigma, 0.0, epsilon = 1e-15);
        let thresholds = ThresholdSet::from_moments(&moments);
        assert_relative_eq!(thresholds.moderate, 0.01, epsilon = 1e-12);
        assert_relative_eq!(thresholds.strong, 0.01, epsilon = 1e-12);
        assert_relative_eq!(thresholds.very_strong, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_single_observation_has_zero_sigma() {
        let series = returns(&[0.02]);
        let moments = ReturnMoments::of(&series);
        assert_eq!(moments.sigma, 0.0);
        assert!(moments.mu.is_finite());
    }

    #[test]
    fn test_get_by_severity() {
        let thresholds = ThresholdSet {
            moderate: -0.01,
            strong: -0.02,
            very_strong: -0.03,
        };
        assert_eq!(thresholds.get(Severity::Moderate), -0.01);
        assert_eq!(thresholds.get(Severity::Strong), -0.02);
        assert_eq!(thresholds.get(Severity::VeryStrong), -0.03);
    }
}
