//! Standardized effect sizes for two-sample comparisons
//!
//! All signs follow one convention: first sample minus second sample. A
//! positive value means the first sample sits higher.

use serde::Serialize;

use crate::analysis::descriptive::{mean, sample_variance, t_critical};
use crate::analysis::AnalysisConfig;
use crate::error::{AnalysisError, Result};

/// Mean difference with its confidence interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceCi {
    /// Mean of the first sample minus mean of the second
    pub difference: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

fn check_sample_sizes(a: &[f64], b: &[f64], config: &AnalysisConfig) -> Result<()> {
    let floor = config.min_sample_size.max(2);
    let smallest = a.len().min(b.len());
    if smallest < floor {
        return Err(AnalysisError::InsufficientData {
            required: floor,
            actual: smallest,
        });
    }
    Ok(())
}

fn directional(diff: f64) -> f64 {
    if diff == 0.0 {
        0.0
    } else if diff > 0.0 {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

/// Hedges' g: pooled-sd standardized mean difference with the small-sample
/// correction J = 1 - 3 / (4(n1 + n2) - 9)
///
/// Sign is mean(a) - mean(b). Constant samples yield 0 when the means agree
/// and a signed infinity otherwise.
pub fn hedges_g(a: &[f64], b: &[f64], config: &AnalysisConfig) -> Result<f64> {
    check_sample_sizes(a, b, config)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let diff = mean(a) - mean(b);
    let pooled_var =
        ((n1 - 1.0) * sample_variance(a) + (n2 - 1.0) * sample_variance(b)) / (n1 + n2 - 2.0);

    if pooled_var == 0.0 {
        return Ok(directional(diff));
    }

    let d = diff / pooled_var.sqrt();
    let correction = 1.0 - 3.0 / (4.0 * (n1 + n2) - 9.0);
    Ok(d * correction)
}

/// Glass's delta: mean difference standardized by the first sample's sd
///
/// Useful when the first sample is a control whose spread defines the scale.
pub fn glass_delta(a: &[f64], b: &[f64], config: &AnalysisConfig) -> Result<f64> {
    check_sample_sizes(a, b, config)?;

    let diff = mean(a) - mean(b);
    let sd1 = sample_variance(a).sqrt();

    if sd1 == 0.0 {
        return Ok(directional(diff));
    }

    Ok(diff / sd1)
}

/// Confidence interval for the mean difference using the Welch standard error
/// and Welch-Satterthwaite degrees of freedom
pub fn mean_difference_ci(a: &[f64], b: &[f64], config: &AnalysisConfig) -> Result<DifferenceCi> {
    check_sample_sizes(a, b, config)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let difference = mean(a) - mean(b);
    let (v1, v2) = (sample_variance(a) / n1, sample_variance(b) / n2);
    let se_sq = v1 + v2;

    if se_sq == 0.0 {
        return Ok(DifferenceCi {
            difference,
            ci_low: difference,
            ci_high: difference,
        });
    }

    let df = se_sq * se_sq / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
    let margin = t_critical(df, config.confidence_level) * se_sq.sqrt();

    Ok(DifferenceCi {
        difference,
        ci_low: difference - margin,
        ci_high: difference + margin,
    })
}
