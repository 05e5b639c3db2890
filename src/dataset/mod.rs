// Typed CSV ingestion for the survey exports
//
// One record type per dataset, parsed and validated as rows are read, so a
// bad export fails at the load boundary with the offending column named
// instead of surfacing as NaN inside a statistic. Blank cells are missing
// values; non-blank cells that fail to parse as numbers are errors.

pub mod feedback;
pub mod impacts;
pub mod partition;
pub mod pubs;

pub use feedback::{load_feedback, FeedbackRecord, FEEDBACK_QUESTIONS};
pub use impacts::{load_impacts, ImpactRecord};
pub use partition::{partition_by, Partition};
pub use pubs::{load_pubs, PubRecord};

use crate::error::{AnalysisError, Result};

/// Column positions resolved once from the header row
pub(crate) struct Columns {
    headers: Vec<String>,
}

impl Columns {
    pub(crate) fn new(headers: &csv::StringRecord) -> Self {
        Self {
            headers: headers.iter().map(|h| h.trim().to_string()).collect(),
        }
    }

    /// Position of a column the dataset cannot do without
    pub(crate) fn required(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| AnalysisError::format(name, "column not found in header"))
    }

    /// Position of a column older exports may lack
    pub(crate) fn optional(&self, name: &str) -> Option<usize> {
        self.position(name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Cell text at `idx`, trimmed. Empty when the row is shorter than the header.
pub(crate) fn cell<'r>(record: &'r csv::StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

/// Non-blank cell text as an owned value
pub(crate) fn text_cell(record: &csv::StringRecord, idx: usize) -> Option<String> {
    let text = cell(record, idx);
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Numeric cell: blank is missing, anything else must parse
pub(crate) fn numeric_cell(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
) -> Result<Option<f64>> {
    let text = cell(record, idx);
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| AnalysisError::format(column, format!("not a number: {text:?}")))
}

/// Row-level failure from the csv reader (ragged rows, bad encoding)
pub(crate) fn row_error(err: csv::Error) -> AnalysisError {
    AnalysisError::format("row", err.to_string())
}
