//! Feedback survey export
//!
//! One row per submitted form. Submission timestamps use the tracker's
//! `%m/%d/%Y %I:%M%p` format; rows whose timestamp fails to parse keep a
//! missing date and are counted by the temporal analysis rather than aborting
//! the load, since old exports contain a handful of hand-edited values.

use std::io::Read;

use chrono::NaiveDateTime;

use crate::dataset::{cell, row_error, text_cell, Columns};
use crate::error::{AnalysisError, Result};

/// The four survey questions, in form order
pub const FEEDBACK_QUESTIONS: [&str; 4] = [
    "How straightforward was this pub?",
    "Could this pub be useful in your own work?",
    "Were you able to find all the information you'd need to assess or reuse this work?",
    "Does the evidence presented support the claims?",
];

const DATE_FORMAT: &str = "%m/%d/%Y %I:%M%p";

/// One survey response
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    /// Submission time; `None` when blank or unparseable
    pub submitted: Option<NaiveDateTime>,
    pub version: Option<String>,
    /// Answers aligned with [`FEEDBACK_QUESTIONS`]; `None` for unanswered
    pub answers: [Option<String>; 4],
}

impl FeedbackRecord {
    /// Answer to question `index`, if given
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers[index].as_deref()
    }

    /// Month of submission as `YYYY-MM`
    pub fn month(&self) -> Option<String> {
        self.submitted.map(|dt| dt.format("%Y-%m").to_string())
    }
}

/// A question column, matched with or without its trailing question mark
///
/// One export generation dropped the `?` from the last question's header;
/// both spellings are accepted.
fn question_column(columns: &Columns, name: &str) -> Result<usize> {
    columns
        .optional(name)
        .or_else(|| columns.optional(name.trim_end_matches('?')))
        .ok_or_else(|| AnalysisError::format(name, "column not found in header"))
}

/// Load the feedback survey export
pub fn load_feedback<R: Read>(reader: R) -> Result<Vec<FeedbackRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(row_error)?.clone();
    let columns = Columns::new(&headers);
    let submitted = columns.required("Date submitted")?;
    let version = columns.required("Publishing version (from Pub)")?;
    let mut questions = [0usize; 4];
    for (slot, name) in questions.iter_mut().zip(FEEDBACK_QUESTIONS) {
        *slot = question_column(&columns, name)?;
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(row_error)?;
        let answers = questions.map(|idx| text_cell(&row, idx));
        records.push(FeedbackRecord {
            submitted: NaiveDateTime::parse_from_str(cell(&row, submitted), DATE_FORMAT).ok(),
            version: text_cell(&row, version),
            answers,
        });
    }

    Ok(records)
}
