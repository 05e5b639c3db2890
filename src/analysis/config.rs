// Configuration for the statistical comparison pipeline
//
// No magic numbers inside the statistics code: significance level, confidence
// level, and sample-size floors all live here so every subcommand runs the
// same tests the same way.

use serde::{Deserialize, Serialize};

/// Configuration shared by the descriptive and inferential routines
///
/// # Example
/// ```
/// use pubstats::analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Significance level (alpha) for hypothesis tests
    ///
    /// - 0.05 (default): the conventional 95% confidence level
    /// - 0.01: stricter, fewer false positives
    pub significance_level: f64,

    /// Confidence level for interval estimates (mean CI, mean-difference CI)
    pub confidence_level: f64,

    /// Minimum observations per sample for tests and interval estimates
    ///
    /// Two is the mathematical floor for a sample standard deviation; anything
    /// below it raises `InsufficientData` instead of producing NaN.
    pub min_sample_size: usize,

    /// Largest per-sample size for which Mann-Whitney switches to exact
    /// enumeration of the U distribution (tie-free samples only)
    pub exact_rank_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            confidence_level: 0.95,
            min_sample_size: 2,
            exact_rank_limit: 10,
        }
    }
}

impl AnalysisConfig {
    /// Strict configuration (99% confidence, larger minimum samples)
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01,
            confidence_level: 0.99,
            min_sample_size: 5,
            exact_rank_limit: 10,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.significance_level) || self.significance_level == 0.0 {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if !(0.0..1.0).contains(&self.confidence_level) || self.confidence_level == 0.0 {
            return Err(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            ));
        }

        if self.min_sample_size < 2 {
            return Err(format!(
                "min_sample_size must be >= 2 for a sample standard deviation, got {}",
                self.min_sample_size
            ));
        }

        Ok(())
    }
}
