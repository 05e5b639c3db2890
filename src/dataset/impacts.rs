//! Reader comment impact export
//!
//! One row per comment. The `Impact` cell holds zero or more comma-separated
//! labels assigned by the team; a blank cell means the comment was never
//! rated. Multi-label cells count once per label downstream.

use std::io::Read;

use crate::dataset::{cell, row_error, text_cell, Columns};
use crate::error::Result;

/// One reader comment
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactRecord {
    pub version: Option<String>,
    /// Impact labels, trimmed, empties dropped; empty for unrated comments
    pub impacts: Vec<String>,
}

impl ImpactRecord {
    pub fn is_rated(&self) -> bool {
        !self.impacts.is_empty()
    }
}

/// Comma-separated impact labels, trimmed, keeping duplicates
///
/// Unlike service lists, repeated labels in one cell are deliberate (a
/// comment can have the same impact twice recorded) and stay separate counts.
fn impact_cell(record: &csv::StringRecord, idx: usize) -> Vec<String> {
    cell(record, idx)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the comment impact export
pub fn load_impacts<R: Read>(reader: R) -> Result<Vec<ImpactRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(row_error)?.clone();
    let columns = Columns::new(&headers);
    let impact = columns.required("Impact")?;
    let version = columns.required("Publishing version (from Pub)")?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(row_error)?;
        records.push(ImpactRecord {
            version: text_cell(&row, version),
            impacts: impact_cell(&row, impact),
        });
    }

    Ok(records)
}
