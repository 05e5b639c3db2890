//! `pubs` subcommand: publication timeline statistics
//!
//! Reports lifecycle status counts, workdays-to-publication comparisons
//! between versions, an optional initial-vs-new cohort split of v2.0 driven
//! by an earlier export, right-censored in-progress durations, Flesch
//! Reading Ease of the published record, and service request frequencies.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::analysis::{
    glass_delta, hedges_g, mann_whitney_u, mean_difference_ci, summarize, welch_t_test,
    AnalysisConfig, DifferenceCi, Summary, TestResult,
};
use crate::cli::{OutputFormat, PubsArgs};
use crate::commands::{VERSION_V1, VERSION_V2};
use crate::dataset::{load_pubs, PubRecord};
use crate::report::{fmt_ci, fmt_p, render_histograms, rule, HistogramPanel};

/// Publication counts by version and lifecycle stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub v1_completed: usize,
    pub v1_published: usize,
    pub v2_completed: usize,
    pub v2_published: usize,
    pub v2_in_progress: usize,
}

/// A labelled sample with its descriptive summary
///
/// `summary` is absent when the sample is too small to describe.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// Two-sample comparison: both tests plus effect sizes
#[derive(Debug, Clone, Serialize)]
pub struct GroupComparison {
    pub welch: TestResult,
    pub mann_whitney: TestResult,
    pub hedges_g: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glass_delta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_difference_ci: Option<DifferenceCi>,
}

/// v2.0 workdays split by whether the row already existed in the baseline
/// export
#[derive(Debug, Clone, Serialize)]
pub struct CohortAnalysis {
    pub initial: GroupSummary,
    pub subsequent: GroupSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<GroupComparison>,
}

/// One service type with its request count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCount {
    pub name: String,
    pub count: usize,
}

/// Request-count summary for one slice of the v2.0 rows
#[derive(Debug, Clone, Serialize)]
pub struct RequestSummary {
    pub label: String,
    pub n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// Full pubs analysis, serializable as the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct PubsReport {
    pub version: String,
    pub format: String,
    pub status_counts: StatusCounts,
    /// Published workday summaries, v1.0 then v2.0
    pub published: Vec<GroupSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workdays_comparison: Option<GroupComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohorts: Option<CohortAnalysis>,
    pub in_progress: GroupSummary,
    /// Flesch Reading Ease summaries, v1.0 then v2.0
    pub flesch: Vec<GroupSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flesch_comparison: Option<GroupComparison>,
    pub service_requests: Vec<ServiceCount>,
    pub requests: Vec<RequestSummary>,
}

pub fn run(args: &PubsArgs) -> anyhow::Result<()> {
    let config = AnalysisConfig::default();
    let records = load_pubs_file(&args.csv)?;
    tracing::debug!("loaded {} publication rows", records.len());

    let baseline = match &args.baseline {
        Some(path) => Some(load_pubs_file(path)?),
        None => None,
    };

    let report = build_report(&records, baseline.as_deref(), &config);

    if let Some(path) = &args.histogram {
        let svg = workdays_histograms(&records);
        std::fs::write(path, svg)
            .with_context(|| format!("writing histogram to {}", path.display()))?;
        tracing::debug!("wrote workdays histogram to {}", path.display());
    }

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn load_pubs_file(path: &Path) -> anyhow::Result<Vec<PubRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    load_pubs(file).with_context(|| format!("loading {}", path.display()))
}

/// Run every pubs analysis over the export
///
/// Rows with a missing or non-positive workday count are kept for the status
/// tally and the service frequencies but excluded from every duration
/// statistic, since zero means the clock never started.
pub fn build_report(
    records: &[PubRecord],
    baseline: Option<&[PubRecord]>,
    config: &AnalysisConfig,
) -> PubsReport {
    let timed: Vec<&PubRecord> = records
        .iter()
        .filter(|r| matches!(r.workdays, Some(d) if d > 0.0))
        .collect();

    let published_days = |version: &str| -> Vec<f64> {
        timed
            .iter()
            .filter(|r| r.is_published() && r.version.as_deref() == Some(version))
            .filter_map(|r| r.workdays)
            .collect()
    };
    let v1_days = published_days(VERSION_V1);
    let v2_days = published_days(VERSION_V2);

    let in_progress_days: Vec<f64> = timed
        .iter()
        .filter(|r| !r.is_published())
        .filter_map(|r| r.workdays)
        .collect();

    let flesch_scores = |version: &str| -> Vec<f64> {
        records
            .iter()
            .filter(|r| r.is_published() && r.version.as_deref() == Some(version))
            .filter_map(|r| r.flesch)
            .filter(|f| (0.0..=100.0).contains(f))
            .collect()
    };
    let v1_flesch = flesch_scores(VERSION_V1);
    let v2_flesch = flesch_scores(VERSION_V2);

    PubsReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        format: "pubstats-pubs-v1".to_string(),
        status_counts: count_statuses(records),
        published: vec![
            summarize_group("Version 1.0 pubs", &v1_days, config),
            summarize_group("Version 2.0 pubs (all)", &v2_days, config),
        ],
        workdays_comparison: compare_groups(&v1_days, &v2_days, config, false, true),
        cohorts: baseline.map(|base| cohort_analysis(&timed, base, config)),
        in_progress: summarize_group("All in-progress pubs", &in_progress_days, config),
        flesch: vec![
            summarize_group("Version 1.0 pubs FRE", &v1_flesch, config),
            summarize_group("Version 2.0 pubs FRE", &v2_flesch, config),
        ],
        flesch_comparison: compare_groups(&v1_flesch, &v2_flesch, config, false, false),
        service_requests: count_services(records),
        requests: request_summaries(records, config),
    }
}

fn count_statuses(records: &[PubRecord]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for r in records {
        match r.version.as_deref() {
            Some(VERSION_V1) => {
                if r.is_completed() {
                    counts.v1_completed += 1;
                }
                if r.is_published() {
                    counts.v1_published += 1;
                }
            }
            Some(VERSION_V2) => {
                if r.is_completed() {
                    counts.v2_completed += 1;
                } else {
                    counts.v2_in_progress += 1;
                }
                if r.is_published() {
                    counts.v2_published += 1;
                }
            }
            _ => {}
        }
    }
    counts
}

fn summarize_group(label: &str, values: &[f64], config: &AnalysisConfig) -> GroupSummary {
    GroupSummary {
        label: label.to_string(),
        n: values.len(),
        summary: summarize(values, config).ok(),
    }
}

/// Both tests plus effect sizes, or `None` when a sample is too small
fn compare_groups(
    a: &[f64],
    b: &[f64],
    config: &AnalysisConfig,
    with_glass: bool,
    with_ci: bool,
) -> Option<GroupComparison> {
    let welch = welch_t_test(a, b, config).ok()?;
    let mann_whitney = mann_whitney_u(a, b, config).ok()?;
    let g = hedges_g(a, b, config).ok()?;
    let glass = with_glass.then(|| glass_delta(a, b, config).ok()).flatten();
    let ci = with_ci
        .then(|| mean_difference_ci(a, b, config).ok())
        .flatten();
    Some(GroupComparison {
        welch,
        mann_whitney,
        hedges_g: g,
        glass_delta: glass,
        mean_difference_ci: ci,
    })
}

/// Split published v2.0 rows by presence in the baseline export
///
/// Rows whose id appears among the baseline's v2.0 ids were part of the
/// initial batch; everything else, including rows without an id, is treated
/// as new work.
fn cohort_analysis(
    timed: &[&PubRecord],
    baseline: &[PubRecord],
    config: &AnalysisConfig,
) -> CohortAnalysis {
    let baseline_ids: HashSet<&str> = baseline
        .iter()
        .filter(|r| r.version.as_deref() == Some(VERSION_V2))
        .filter_map(|r| r.arbitrary_id.as_deref())
        .collect();

    let mut initial = Vec::new();
    let mut subsequent = Vec::new();
    for r in timed
        .iter()
        .filter(|r| r.is_published() && r.version.as_deref() == Some(VERSION_V2))
    {
        let Some(days) = r.workdays else { continue };
        match r.arbitrary_id.as_deref() {
            Some(id) if baseline_ids.contains(id) => initial.push(days),
            _ => subsequent.push(days),
        }
    }

    CohortAnalysis {
        comparison: compare_groups(&initial, &subsequent, config, true, true),
        initial: summarize_group("Initial v2.0 pubs", &initial, config),
        subsequent: summarize_group("'New' v2.0 pubs", &subsequent, config),
    }
}

fn count_services(records: &[PubRecord]) -> Vec<ServiceCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        for service in &r.request_types {
            *counts.entry(service.as_str()).or_default() += 1;
        }
    }
    let mut services: Vec<ServiceCount> = counts
        .into_iter()
        .map(|(name, count)| ServiceCount {
            name: name.to_string(),
            count,
        })
        .collect();
    services.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    services
}

fn request_summaries(records: &[PubRecord], config: &AnalysisConfig) -> Vec<RequestSummary> {
    let v2: Vec<&PubRecord> = records
        .iter()
        .filter(|r| r.version.as_deref() == Some(VERSION_V2))
        .collect();

    let overall: Vec<f64> = v2.iter().filter_map(|r| r.requests).collect();
    let completed: Vec<f64> = v2
        .iter()
        .filter(|r| r.is_completed())
        .filter_map(|r| r.requests)
        .collect();
    let incomplete: Vec<f64> = v2
        .iter()
        .filter(|r| !r.is_completed())
        .filter_map(|r| r.requests)
        .collect();

    vec![
        request_summary("Overall", overall, config),
        request_summary("Completed pubs", completed, config),
        request_summary("Incomplete pubs", incomplete, config),
    ]
}

fn request_summary(label: &str, values: Vec<f64>, config: &AnalysisConfig) -> RequestSummary {
    RequestSummary {
        label: label.to_string(),
        n: values.len(),
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
        summary: summarize(&values, config).ok(),
    }
}

/// Completed-workdays histograms, one panel per version
///
/// v1.0 keeps the finer 10-bin resolution; v2.0 uses 5 bins because its
/// completed sample is still small.
fn workdays_histograms(records: &[PubRecord]) -> String {
    let completed_days = |version: &str| -> Vec<f64> {
        records
            .iter()
            .filter(|r| r.is_completed() && r.version.as_deref() == Some(version))
            .filter_map(|r| r.workdays)
            .collect()
    };
    let panels = vec![
        HistogramPanel {
            title: "Workdays to Completion (v1.0)".to_string(),
            values: completed_days(VERSION_V1),
            bins: 10,
        },
        HistogramPanel {
            title: "Workdays to Completion (v2.0)".to_string(),
            values: completed_days(VERSION_V2),
            bins: 5,
        },
    ];
    render_histograms(&panels, "Workdays", "Number of Publications")
}

impl PubsReport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing pubs report")
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Publication Statistics:\n");
        out.push_str(&rule(50));
        out.push('\n');
        let c = &self.status_counts;
        out.push_str(&format!(
            "Total number of v1.0 pubs completed: {}\n",
            c.v1_completed
        ));
        out.push_str(&format!(
            "Total number of v1.0 pubs released publicly: {}\n",
            c.v1_published
        ));
        out.push_str(&format!(
            "Total number of v2.0 pubs completed: {}\n",
            c.v2_completed
        ));
        out.push_str(&format!(
            "Total number of v2.0 pubs released publicly: {}\n",
            c.v2_published
        ));
        out.push_str(&format!(
            "Total number of v2.0 pubs in progress: {}\n",
            c.v2_in_progress
        ));

        out.push_str("\n--- Published pub stats ---\n");
        for group in &self.published {
            push_summary(&mut out, group, true);
        }
        out.push_str(&rule(55));
        out.push('\n');

        out.push_str("\n--- Comparison (workdays): v1.0 vs v2.0 (published) ---\n");
        push_comparison(&mut out, self.workdays_comparison.as_ref());
        out.push_str(&rule(55));
        out.push('\n');

        if let Some(cohorts) = &self.cohorts {
            out.push_str("\n--- v2.0 performance over time ---\n");
            push_summary(&mut out, &cohorts.initial, true);
            push_summary(&mut out, &cohorts.subsequent, true);
            out.push_str("\n# Comparison: initial vs. new v2.0\n");
            push_comparison(&mut out, cohorts.comparison.as_ref());
            out.push_str(&rule(55));
            out.push('\n');
        }

        out.push_str("\n--- Current in-progress pubs (right-censored data) ---\n");
        push_summary(&mut out, &self.in_progress, false);
        out.push_str(&rule(55));
        out.push('\n');

        out.push_str("\n--- Flesch Reading Ease (published) ---\n");
        for group in &self.flesch {
            push_summary(&mut out, group, true);
        }
        out.push_str("\n# Comparison: FRE v1 vs v2\n");
        push_comparison(&mut out, self.flesch_comparison.as_ref());
        out.push_str(&rule(55));
        out.push('\n');

        out.push_str("\nService request frequencies:\n");
        out.push_str(&rule(50));
        out.push('\n');
        for service in &self.service_requests {
            out.push_str(&format!("{}: {}\n", service.name, service.count));
        }

        out.push_str("\nRequests Statistics v2.0:\n");
        out.push_str(&rule(50));
        out.push('\n');
        for requests in &self.requests {
            push_request_summary(&mut out, requests);
        }

        out
    }
}

fn push_summary(out: &mut String, group: &GroupSummary, show_ci: bool) {
    out.push_str(&format!("\n# {} (n={}):\n", group.label, group.n));
    if let Some(s) = &group.summary {
        out.push_str(&format!("  - Mean: {:.1}, SD: {:.1}\n", s.mean, s.sd));
        out.push_str(&format!(
            "  - Median: {:.1}, IQR: [{:.1}, {:.1}]\n",
            s.median, s.q1, s.q3
        ));
        if show_ci {
            out.push_str(&format!(
                "  - 95% CI for mean: {}\n",
                fmt_ci(s.ci_low, s.ci_high)
            ));
        }
    }
}

fn push_comparison(out: &mut String, comparison: Option<&GroupComparison>) {
    let Some(c) = comparison else {
        out.push_str("  - Not enough data for comparison.\n");
        return;
    };
    out.push_str(&format!(
        "  - Welch's t-test p-value: {}\n",
        fmt_p(c.welch.p_value)
    ));
    out.push_str(&format!(
        "  - Mann-Whitney U p-value: {}\n",
        fmt_p(c.mann_whitney.p_value)
    ));
    out.push_str(&format!("  - Effect size (Hedges' g): {:.3}\n", c.hedges_g));
    if let Some(delta) = c.glass_delta {
        out.push_str(&format!("  - Effect size (Glass's delta): {delta:.3}\n"));
    }
    if let Some(ci) = &c.mean_difference_ci {
        out.push_str(&format!(
            "  - 95% CI for mean difference: {} workdays\n",
            fmt_ci(ci.ci_low, ci.ci_high)
        ));
    }
}

fn push_request_summary(out: &mut String, requests: &RequestSummary) {
    out.push_str(&format!("\n# {} (n={}):\n", requests.label, requests.n));
    if let Some(s) = &requests.summary {
        out.push_str(&format!("  - Mean: {:.1}, SD: {:.1}\n", s.mean, s.sd));
        out.push_str(&format!(
            "  - Median: {:.1}, IQR: [{:.1}, {:.1}]\n",
            s.median, s.q1, s.q3
        ));
        out.push_str(&format!(
            "  - 95% CI for mean: {}\n",
            fmt_ci(s.ci_low, s.ci_high)
        ));
    }
    if let (Some(min), Some(max)) = (requests.min, requests.max) {
        out.push_str(&format!("  - Min: {min:.0}, Max: {max:.0}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::pubs::{STATUS_COMPLETE_INTERNAL, STATUS_PUBLISHED};

    fn record(status: &str, version: &str, workdays: Option<f64>) -> PubRecord {
        PubRecord {
            status: status.to_string(),
            version: Some(version.to_string()),
            workdays,
            flesch: None,
            requests: None,
            request_types: Vec::new(),
            arbitrary_id: None,
        }
    }

    fn published(version: &str, workdays: f64) -> PubRecord {
        record(STATUS_PUBLISHED, version, Some(workdays))
    }

    #[test]
    fn test_status_counts() {
        let records = vec![
            published("v1.0", 10.0),
            record(STATUS_COMPLETE_INTERNAL, "v1.0", Some(8.0)),
            published("v2.0", 20.0),
            record("Service(s) in progress", "v2.0", Some(5.0)),
            record("Not started", "v2.0", None),
        ];
        let counts = count_statuses(&records);
        assert_eq!(counts.v1_completed, 2);
        assert_eq!(counts.v1_published, 1);
        assert_eq!(counts.v2_completed, 1);
        assert_eq!(counts.v2_published, 1);
        assert_eq!(counts.v2_in_progress, 2);
    }

    #[test]
    fn test_published_summaries_and_comparison() {
        let mut records: Vec<PubRecord> =
            [10.0, 12.0, 14.0, 11.0, 13.0].map(|d| published("v1.0", d)).into();
        records.extend([20.0, 22.0, 19.0, 21.0, 23.0].map(|d| published("v2.0", d)));

        let report = build_report(&records, None, &AnalysisConfig::default());
        assert_eq!(report.published[0].n, 5);
        assert_eq!(report.published[1].n, 5);
        let comparison = report.workdays_comparison.as_ref().unwrap();
        assert!(comparison.welch.p_value < 1e-4);
        assert!(comparison.hedges_g < 0.0);
        assert!(comparison.mean_difference_ci.is_some());
        assert!(comparison.glass_delta.is_none());
    }

    #[test]
    fn test_zero_and_missing_workdays_excluded_from_durations() {
        let records = vec![
            published("v1.0", 10.0),
            published("v1.0", 0.0),
            record(STATUS_PUBLISHED, "v1.0", None),
        ];
        let report = build_report(&records, None, &AnalysisConfig::default());
        assert_eq!(report.published[0].n, 1);
        // but all three rows still count as published
        assert_eq!(report.status_counts.v1_published, 3);
    }

    #[test]
    fn test_cohort_split_by_baseline_ids() {
        let with_id = |id: &str, days: f64| PubRecord {
            arbitrary_id: Some(id.to_string()),
            ..published("v2.0", days)
        };
        let records = vec![
            with_id("A", 30.0),
            with_id("B", 32.0),
            with_id("C", 12.0),
            published("v2.0", 14.0), // no id: new
        ];
        let baseline = vec![with_id("A", 30.0), with_id("B", 28.0)];

        let report = build_report(&records, Some(&baseline), &AnalysisConfig::default());
        let cohorts = report.cohorts.as_ref().unwrap();
        assert_eq!(cohorts.initial.n, 2);
        assert_eq!(cohorts.subsequent.n, 2);
        let comparison = cohorts.comparison.as_ref().unwrap();
        assert!(comparison.glass_delta.is_some());
    }

    #[test]
    fn test_in_progress_is_everything_not_published() {
        let records = vec![
            published("v2.0", 20.0),
            record(STATUS_COMPLETE_INTERNAL, "v2.0", Some(15.0)),
            record("Service(s) in progress", "v2.0", Some(7.0)),
        ];
        let report = build_report(&records, None, &AnalysisConfig::default());
        assert_eq!(report.in_progress.n, 2);
    }

    #[test]
    fn test_flesch_keeps_only_plausible_scores() {
        let with_flesch = |version: &str, flesch: f64| PubRecord {
            flesch: Some(flesch),
            ..published(version, 10.0)
        };
        let records = vec![
            with_flesch("v1.0", 50.0),
            with_flesch("v1.0", 105.0),
            with_flesch("v1.0", -2.0),
            with_flesch("v1.0", 0.0),
        ];
        let report = build_report(&records, None, &AnalysisConfig::default());
        assert_eq!(report.flesch[0].n, 2);
    }

    #[test]
    fn test_service_counts_sorted_by_count_then_name() {
        let with_services = |services: &[&str]| PubRecord {
            request_types: services.iter().map(|s| s.to_string()).collect(),
            ..published("v2.0", 10.0)
        };
        let records = vec![
            with_services(&["Editing", "Figures"]),
            with_services(&["Editing"]),
            with_services(&["Artwork"]),
        ];
        let services = count_services(&records);
        assert_eq!(services[0].name, "Editing");
        assert_eq!(services[0].count, 2);
        // tie between Artwork and Figures breaks alphabetically
        assert_eq!(services[1].name, "Artwork");
        assert_eq!(services[2].name, "Figures");
    }

    #[test]
    fn test_request_summaries_split_by_completion() {
        let with_requests = |status: &str, requests: f64| PubRecord {
            requests: Some(requests),
            ..record(status, "v2.0", Some(10.0))
        };
        let records = vec![
            with_requests(STATUS_PUBLISHED, 3.0),
            with_requests(STATUS_PUBLISHED, 5.0),
            with_requests("Service(s) in progress", 8.0),
        ];
        let requests = request_summaries(&records, &AnalysisConfig::default());
        assert_eq!(requests[0].label, "Overall");
        assert_eq!(requests[0].n, 3);
        assert_eq!(requests[0].min, Some(3.0));
        assert_eq!(requests[0].max, Some(8.0));
        assert_eq!(requests[1].n, 2);
        assert_eq!(requests[2].n, 1);
        assert!(requests[2].summary.is_none());
    }

    #[test]
    fn test_render_text_sections() {
        let mut records: Vec<PubRecord> =
            [10.0, 12.0, 14.0, 11.0, 13.0].map(|d| published("v1.0", d)).into();
        records.extend([20.0, 22.0, 19.0, 21.0, 23.0].map(|d| published("v2.0", d)));

        let report = build_report(&records, None, &AnalysisConfig::default());
        let text = report.render_text();
        assert!(text.contains("Publication Statistics:"));
        assert!(text.contains("--- Published pub stats ---"));
        assert!(text.contains("# Version 1.0 pubs (n=5):"));
        assert!(text.contains("  - Welch's t-test p-value: <0.0001"));
        assert!(text.contains("  - 95% CI for mean difference:"));
        assert!(text.contains("Service request frequencies:"));
        // no baseline, so no cohort section
        assert!(!text.contains("v2.0 performance over time"));
    }

    #[test]
    fn test_render_text_notes_missing_comparison() {
        let records = vec![published("v1.0", 10.0)];
        let report = build_report(&records, None, &AnalysisConfig::default());
        let text = report.render_text();
        assert!(text.contains("  - Not enough data for comparison."));
    }

    #[test]
    fn test_json_report_tagged() {
        let report = build_report(&[], None, &AnalysisConfig::default());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"format\": \"pubstats-pubs-v1\""));
        assert!(json.contains("\"status_counts\""));
    }

    #[test]
    fn test_histogram_svg_has_both_panels() {
        let records = vec![
            published("v1.0", 10.0),
            published("v1.0", 20.0),
            published("v2.0", 15.0),
        ];
        let svg = workdays_histograms(&records);
        assert!(svg.contains("Workdays to Completion (v1.0)"));
        assert!(svg.contains("Workdays to Completion (v2.0)"));
        assert!(svg.contains("Number of Publications"));
    }
}
