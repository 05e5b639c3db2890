// Statistical core shared by every subcommand
//
// Descriptive summaries, two-sample tests, contingency tables, familywise
// corrections, and effect sizes. Each routine validates its sample before
// computing, so degenerate input surfaces as an error instead of NaN in a
// report.
//
// Implementation notes:
// - Uses statrs (crates.io) for the t, normal, and chi-squared distributions
// - Quantiles interpolate linearly between order statistics
// - All two-sample quantities follow one sign convention: first argument
//   minus second argument

mod config;
mod contingency;
mod correction;
mod descriptive;
mod effect;
mod hypothesis;

pub use config::AnalysisConfig;
pub use contingency::{chi_squared_independence, ContingencyTable};
pub use correction::{benjamini_hochberg, bonferroni};
pub use descriptive::{summarize, Summary};
pub(crate) use descriptive::quantile;
pub use effect::{glass_delta, hedges_g, mean_difference_ci, DifferenceCi};
pub use hypothesis::{mann_whitney_u, welch_t_test, TestKind, TestResult};
