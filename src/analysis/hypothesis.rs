//! Two-sample hypothesis tests
//!
//! Welch's t-test for mean differences under unequal variances, and the
//! Mann-Whitney U rank test as its distribution-free companion. Both return a
//! two-sided p-value. Mann-Whitney switches to exact enumeration of the U
//! distribution when both samples are small and tie-free; otherwise it uses
//! the normal approximation with tie-corrected variance and continuity
//! correction.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::analysis::descriptive::{mean, sample_variance};
use crate::analysis::AnalysisConfig;
use crate::error::{AnalysisError, Result};

/// Which test produced a [`TestResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    WelchT,
    MannWhitneyU,
    ChiSquared,
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WelchT => write!(f, "Welch's t-test"),
            Self::MannWhitneyU => write!(f, "Mann-Whitney U"),
            Self::ChiSquared => write!(f, "chi-squared"),
        }
    }
}

/// Outcome of a hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub kind: TestKind,
    /// Test statistic: t for Welch, U of the first sample for Mann-Whitney
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Degrees of freedom, for tests that have them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub df: Option<f64>,
}

/// Upper tail of the t-distribution. `df` must be strictly positive.
pub(crate) fn t_sf(x: f64, df: f64) -> f64 {
    let dist = StudentsT::new(0.0, 1.0, df).unwrap();
    (1.0 - dist.cdf(x)).clamp(0.0, 1.0)
}

/// Upper tail of the standard normal
pub(crate) fn normal_sf(x: f64) -> f64 {
    let dist = Normal::new(0.0, 1.0).unwrap();
    (1.0 - dist.cdf(x)).clamp(0.0, 1.0)
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

/// Welch's unequal-variance t-test, two-sided
///
/// The statistic is computed as first sample minus second sample, so swapping
/// the arguments flips its sign and leaves the p-value unchanged. Degrees of
/// freedom follow Welch-Satterthwaite.
pub fn welch_t_test(a: &[f64], b: &[f64], config: &AnalysisConfig) -> Result<TestResult> {
    check_sample_sizes(a, b, config)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, m2) = (mean(a), mean(b));
    let (v1, v2) = (sample_variance(a) / n1, sample_variance(b) / n2);
    let se_sq = v1 + v2;

    // Both samples constant: no sampling variability to test against
    if se_sq == 0.0 {
        let (statistic, p_value) = if m1 == m2 {
            (0.0, 1.0)
        } else if m1 > m2 {
            (f64::INFINITY, 0.0)
        } else {
            (f64::NEG_INFINITY, 0.0)
        };
        return Ok(TestResult {
            kind: TestKind::WelchT,
            statistic,
            p_value,
            df: None,
        });
    }

    let statistic = (m1 - m2) / se_sq.sqrt();
    let df = se_sq * se_sq / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
    let p_value = (2.0 * t_sf(statistic.abs(), df)).min(1.0);

    Ok(TestResult {
        kind: TestKind::WelchT,
        statistic,
        p_value,
        df: Some(df),
    })
}

struct RankedSamples {
    /// Sum of ranks assigned to the first sample
    rank_sum_first: f64,
    /// Sum of t^3 - t over tie groups of size t
    tie_sum: f64,
    has_ties: bool,
}

/// Rank the pooled samples, assigning mid-ranks to tied values
fn rank_combined(a: &[f64], b: &[f64]) -> RankedSamples {
    let mut pooled: Vec<(f64, bool)> = Vec::with_capacity(a.len() + b.len());
    pooled.extend(a.iter().map(|&v| (v, true)));
    pooled.extend(b.iter().map(|&v| (v, false)));
    pooled.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut rank_sum_first = 0.0;
    let mut tie_sum = 0.0;
    let mut has_ties = false;

    let mut i = 0;
    while i < pooled.len() {
        let mut j = i;
        while j < pooled.len() && pooled[j].0 == pooled[i].0 {
            j += 1;
        }

        // Ranks are 1-based; every member of a tie group gets the average
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        let group = (j - i) as f64;
        if j - i > 1 {
            has_ties = true;
            tie_sum += group * group * group - group;
        }
        for k in i..j {
            if pooled[k].1 {
                rank_sum_first += avg_rank;
            }
        }

        i = j;
    }

    RankedSamples {
        rank_sum_first,
        tie_sum,
        has_ties,
    }
}

/// Counts of arrangements by U value for tie-free samples of sizes n1, n2
///
/// Recurrence on the largest pooled value: if it belongs to the first sample
/// it beats all n2 of the second, otherwise it contributes nothing.
fn exact_u_counts(n1: usize, n2: usize) -> Vec<f64> {
    let max_u = n1 * n2;
    // table[n][u] holds the count for the current first-sample size
    let mut table = vec![vec![0.0f64; max_u + 1]; n2 + 1];
    for row in &mut table {
        row[0] = 1.0;
    }

    for _ in 1..=n1 {
        let mut next = vec![vec![0.0f64; max_u + 1]; n2 + 1];
        for n in 0..=n2 {
            for u in 0..=max_u {
                let mut count = if u >= n { table[n][u - n] } else { 0.0 };
                if n >= 1 {
                    count += next[n - 1][u];
                }
                next[n][u] = count;
            }
        }
        table = next;
    }

    table.swap_remove(n2)
}

/// Exact two-sided p-value: twice the larger-tail probability, capped at 1
fn exact_two_sided_p(u1: f64, n1: usize, n2: usize) -> f64 {
    let counts = exact_u_counts(n1, n2);
    let total: f64 = counts.iter().sum();
    let u2 = (n1 * n2) as f64 - u1;
    let upper = u1.max(u2).round() as usize;
    let tail: f64 = counts[upper..].iter().sum();
    (2.0 * tail / total).min(1.0)
}

/// Mann-Whitney U test, two-sided
///
/// The reported statistic is U of the first sample. Exact enumeration is used
/// when both samples are within `config.exact_rank_limit` and the pooled data
/// has no ties; the normal approximation is used otherwise.
pub fn mann_whitney_u(a: &[f64], b: &[f64], config: &AnalysisConfig) -> Result<TestResult> {
    check_sample_sizes(a, b, config)?;

    let n1 = a.len();
    let n2 = b.len();
    let ranked = rank_combined(a, b);
    let u1 = ranked.rank_sum_first - (n1 * (n1 + 1)) as f64 / 2.0;

    if !ranked.has_ties && n1 <= config.exact_rank_limit && n2 <= config.exact_rank_limit {
        return Ok(TestResult {
            kind: TestKind::MannWhitneyU,
            statistic: u1,
            p_value: exact_two_sided_p(u1, n1, n2),
            df: None,
        });
    }

    let nf1 = n1 as f64;
    let nf2 = n2 as f64;
    let n = nf1 + nf2;
    let mean_u = nf1 * nf2 / 2.0;
    let var_u = nf1 * nf2 / 12.0 * ((n + 1.0) - ranked.tie_sum / (n * (n - 1.0)));

    // Every pooled value tied with every other: the ranks carry no information
    if var_u <= 0.0 {
        return Ok(TestResult {
            kind: TestKind::MannWhitneyU,
            statistic: u1,
            p_value: 1.0,
            df: None,
        });
    }

    // Two-sided: take the larger of U1/U2 and apply the continuity correction
    let upper = u1.max(nf1 * nf2 - u1);
    let z = (upper - mean_u - 0.5) / var_u.sqrt();
    let p_value = (2.0 * normal_sf(z)).min(1.0);

    Ok(TestResult {
        kind: TestKind::MannWhitneyU,
        statistic: u1,
        p_value,
        df: None,
    })
}
