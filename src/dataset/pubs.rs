//! Publication timeline export
//!
//! One row per publication: lifecycle status, publishing version, elapsed
//! workdays, the Flesch score of the version of record, and the services the
//! team performed. Flesch scores arrive as percentage strings (`"42.5%"`)
//! because that is how the source tracker displays them.

use std::io::Read;

use crate::dataset::{cell, numeric_cell, row_error, text_cell, Columns};
use crate::error::{AnalysisError, Result};

/// Status value for publicly released publications
pub const STATUS_PUBLISHED: &str = "\u{1F514} Published \u{1F514}";
/// Status value for work finished without a public release
pub const STATUS_COMPLETE_INTERNAL: &str = "Complete \u{2014} internal";

/// One publication row
#[derive(Debug, Clone, PartialEq)]
pub struct PubRecord {
    pub status: String,
    pub version: Option<String>,
    /// Workdays elapsed; for unfinished publications this is time so far
    pub workdays: Option<f64>,
    /// Flesch Reading Ease of the version of record
    pub flesch: Option<f64>,
    /// Total number of pub team requests
    pub requests: Option<f64>,
    /// Distinct service types requested, in row order
    pub request_types: Vec<String>,
    /// Stable row identifier used to match rows across exports
    pub arbitrary_id: Option<String>,
}

impl PubRecord {
    /// Released publicly
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }

    /// Released publicly or finished internally
    pub fn is_completed(&self) -> bool {
        self.is_published() || self.status == STATUS_COMPLETE_INTERNAL
    }
}

/// Flesch cell: percentage string with a trailing `%`, blank for unscored rows
fn percent_cell(record: &csv::StringRecord, idx: usize, column: &str) -> Result<Option<f64>> {
    let text = cell(record, idx);
    if text.is_empty() {
        return Ok(None);
    }
    let stripped = text.strip_suffix('%').unwrap_or(text).trim();
    stripped
        .parse::<f64>()
        .map(Some)
        .map_err(|_| AnalysisError::format(column, format!("not a percentage: {text:?}")))
}

/// Semicolon-separated service list, trimmed and de-duplicated within the row
fn service_cell(record: &csv::StringRecord, idx: usize) -> Vec<String> {
    let mut services = Vec::new();
    for service in cell(record, idx).split(';') {
        let service = service.trim();
        if !service.is_empty() && !services.iter().any(|s| s == service) {
            services.push(service.to_string());
        }
    }
    services
}

/// Load the publication export
///
/// `Status`, `Publishing version`, and `Workdays in progress` must be
/// present; the remaining columns are tolerated as absent so that older
/// exports still load.
pub fn load_pubs<R: Read>(reader: R) -> Result<Vec<PubRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(row_error)?.clone();
    let columns = Columns::new(&headers);
    let status = columns.required("Status")?;
    let version = columns.required("Publishing version")?;
    let workdays = columns.required("Workdays in progress")?;
    let flesch = columns.optional("Flesch reading ease version of record");
    let requests = columns.optional("Total number of pub team requests");
    let request_types = columns.optional("Pub team request types");
    let arbitrary_id = columns.optional("ArbitraryID");

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(row_error)?;
        records.push(PubRecord {
            status: cell(&row, status).to_string(),
            version: text_cell(&row, version),
            workdays: numeric_cell(&row, workdays, "Workdays in progress")?,
            flesch: match flesch {
                Some(idx) => percent_cell(&row, idx, "Flesch reading ease version of record")?,
                None => None,
            },
            requests: match requests {
                Some(idx) => numeric_cell(&row, idx, "Total number of pub team requests")?,
                None => None,
            },
            request_types: request_types.map(|idx| service_cell(&row, idx)).unwrap_or_default(),
            arbitrary_id: arbitrary_id.and_then(|idx| text_cell(&row, idx)),
        });
    }

    Ok(records)
}
