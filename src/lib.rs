//! pubstats - Statistical analysis for publication pipeline exports
//!
//! This library provides the analysis layer behind the `pubstats` CLI:
//! typed CSV ingestion of the publication, feedback, and comment exports,
//! descriptive and inferential statistics for comparing publishing
//! versions, readability scoring of fetched articles, and report
//! rendering as console text, JSON, or SVG charts.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod readability;
pub mod report;
