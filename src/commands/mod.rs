//! Subcommand implementations
//!
//! Each module loads its CSV export, runs the analysis layer, and renders the
//! result as a console report or pretty-printed JSON. The report structs
//! returned by the `build_report` functions double as the JSON bodies, so the
//! two output formats cannot drift apart.

pub mod feedback;
pub mod impacts;
pub mod pubs;
pub mod readability;

/// Version label for first-generation publications
pub(crate) const VERSION_V1: &str = "v1.0";
/// Version label for second-generation publications
pub(crate) const VERSION_V2: &str = "v2.0";
