//! Descriptive statistics for a single numeric sample
//!
//! One immutable [`Summary`] per sample: location, spread, quartiles, and a
//! t-based confidence interval for the mean. Samples below the size floor are
//! rejected up front instead of producing NaN downstream.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::analysis::AnalysisConfig;
use crate::error::{AnalysisError, Result};

/// Descriptive summary of one numeric sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of observations
    pub n: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n-1 denominator)
    pub sd: f64,
    /// Standard error of the mean
    pub sem: f64,
    /// Lower bound of the confidence interval for the mean
    pub ci_low: f64,
    /// Upper bound of the confidence interval for the mean
    pub ci_high: f64,
    /// Median (50th percentile, linear interpolation)
    pub median: f64,
    /// First quartile
    pub q1: f64,
    /// Third quartile
    pub q3: f64,
}

impl Summary {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Width of the confidence interval
    pub fn ci_width(&self) -> f64 {
        self.ci_high - self.ci_low
    }
}

/// Arithmetic mean. Zero for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with the n-1 denominator. Requires n >= 2.
pub(crate) fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    ss / (values.len() - 1) as f64
}

/// Quantile by linear interpolation on sorted data
///
/// The index is `p * (n - 1)`; fractional indices interpolate between the
/// two neighboring order statistics. `p` is a fraction in [0, 1].
pub(crate) fn quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = p * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Two-sided t critical value for the given confidence level
///
/// `df` must be strictly positive; callers guard sample sizes first.
pub(crate) fn t_critical(df: f64, confidence: f64) -> f64 {
    let dist = StudentsT::new(0.0, 1.0, df).unwrap();
    dist.inverse_cdf(0.5 + confidence / 2.0)
}

/// Summarize one numeric sample
///
/// Returns `InsufficientData` when the sample is smaller than
/// `config.min_sample_size` (at least 2, so the standard deviation and the
/// confidence interval are always defined).
///
/// # Example
/// ```
/// use pubstats::analysis::{summarize, AnalysisConfig};
///
/// let summary = summarize(&[10.0, 12.0, 14.0, 11.0, 13.0], &AnalysisConfig::default()).unwrap();
/// assert_eq!(summary.n, 5);
/// assert_eq!(summary.mean, 12.0);
/// assert_eq!(summary.median, 12.0);
/// ```
pub fn summarize(values: &[f64], config: &AnalysisConfig) -> Result<Summary> {
    let floor = config.min_sample_size.max(2);
    if values.len() < floor {
        return Err(AnalysisError::InsufficientData {
            required: floor,
            actual: values.len(),
        });
    }

    let n = values.len();
    let mean = mean(values);
    let sd = sample_variance(values).sqrt();
    let sem = sd / (n as f64).sqrt();

    let t = t_critical((n - 1) as f64, config.confidence_level);
    let ci_low = mean - t * sem;
    let ci_high = mean + t * sem;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(Summary {
        n,
        mean,
        sd,
        sem,
        ci_low,
        ci_high,
        median: quantile(&sorted, 0.5),
        q1: quantile(&sorted, 0.25),
        q3: quantile(&sorted, 0.75),
    })
}
