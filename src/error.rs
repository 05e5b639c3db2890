//! Error taxonomy shared by the analysis pipeline
//!
//! Every stage surfaces failures through this enum; nothing is retried or
//! silently suppressed. The CLI converts these into non-zero exits with the
//! message intact.

use thiserror::Error;

/// Errors raised by loaders, statistical routines, and the fetcher
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Schema or parse failure on load. Names the offending field so the
    /// user can fix the export instead of guessing.
    #[error("field {field:?}: {reason}")]
    Format { field: String, reason: String },

    /// Sample too small for the requested statistic
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Contingency table unusable for a chi-squared test
    #[error("degenerate contingency table: {0}")]
    DegenerateTable(String),

    /// Fetch failure in the readability tool
    #[error("network error: {0}")]
    Network(String),
}

impl AnalysisError {
    /// Shorthand for a field-scoped load failure
    pub fn format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
