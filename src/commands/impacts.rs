//! `impacts` subcommand: reader comment impact tallies
//!
//! Counts comments and their impact labels per publishing version, folds
//! rare labels into an `Other` bucket, and renders the before/after tables
//! plus an optional pie, donut, or grouped bar chart.

use std::collections::BTreeMap;
use std::fs::File;

use anyhow::Context;
use serde::Serialize;

use crate::cli::{ChartType, Grouping, ImpactsArgs, OtherPosition, OutputFormat, SortVersion};
use crate::commands::{VERSION_V1, VERSION_V2};
use crate::dataset::{load_impacts, partition_by, ImpactRecord};
use crate::report::{
    self, heading, percentage, render_grouped_bar_chart, render_pie_chart, rule, BarSeries,
    PiePanel, PieSlice,
};

/// Bucket name for folded labels
const OTHER_LABEL: &str = "Other";

/// Comment and impact tallies for one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionImpactCounts {
    pub version: String,
    pub total_comments: usize,
    pub rated_comments: usize,
    pub unrated_comments: usize,
    pub total_impacts: usize,
}

/// One impact label with its count and share of the version's impacts
#[derive(Debug, Clone, Serialize)]
pub struct ImpactCount {
    pub impact: String,
    pub count: usize,
    pub percentage: f64,
}

/// Per-version impact listing, sorted by count descending
#[derive(Debug, Clone, Serialize)]
pub struct VersionBreakdown {
    pub version: String,
    pub impacts: Vec<ImpactCount>,
}

/// Full impacts analysis, serializable as the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct ImpactsReport {
    pub version: String,
    pub format: String,
    /// Tallies per version, v1.0 then v2.0
    pub counts: Vec<VersionImpactCounts>,
    /// Breakdowns before rare labels fold into `Other`
    pub before: Vec<VersionBreakdown>,
    /// Breakdowns after folding
    pub after: Vec<VersionBreakdown>,
}

pub fn run(args: &ImpactsArgs) -> anyhow::Result<()> {
    let file = File::open(&args.csv).with_context(|| format!("opening {}", args.csv.display()))?;
    let records = load_impacts(file).with_context(|| format!("loading {}", args.csv.display()))?;
    tracing::debug!("loaded {} comment rows", records.len());

    let report = build_report(&records, args);

    if let Some(path) = &args.chart {
        let svg = render_chart(
            &report,
            args.sort_version,
            args.other_position,
            args.chart_type,
            args.chart_style.into(),
        );
        std::fs::write(path, svg).with_context(|| format!("writing chart to {}", path.display()))?;
        tracing::debug!("wrote impact chart to {}", path.display());
    }

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

/// Tally impacts per version and fold rare labels into `Other`
///
/// In threshold mode a label survives when its count summed across both
/// versions reaches the threshold, so a label common in one version is not
/// folded out of the other. Manual mode folds exactly the labels given.
pub fn build_report(records: &[ImpactRecord], args: &ImpactsArgs) -> ImpactsReport {
    let by_version = partition_by(records.iter(), |r| r.version.as_deref());
    let v1_rows = by_version.get_or_empty(VERSION_V1);
    let v2_rows = by_version.get_or_empty(VERSION_V2);

    let raw = [tally(v1_rows), tally(v2_rows)];
    let totals = merged_totals(&raw);

    let is_other = |label: &str| match args.grouping {
        Grouping::Threshold => totals.get(label).copied().unwrap_or(0) < args.threshold,
        Grouping::Manual => args.other_impacts.iter().any(|other| other == label),
    };
    let grouped = [fold_counts(&raw[0], &is_other), fold_counts(&raw[1], &is_other)];

    ImpactsReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        format: "pubstats-impacts-v1".to_string(),
        counts: vec![
            version_counts(VERSION_V1, v1_rows),
            version_counts(VERSION_V2, v2_rows),
        ],
        before: vec![
            breakdown(VERSION_V1, &raw[0]),
            breakdown(VERSION_V2, &raw[1]),
        ],
        after: vec![
            breakdown(VERSION_V1, &grouped[0]),
            breakdown(VERSION_V2, &grouped[1]),
        ],
    }
}

fn tally(rows: &[&ImpactRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in rows {
        for impact in &r.impacts {
            *counts.entry(impact.clone()).or_default() += 1;
        }
    }
    counts
}

fn merged_totals(tables: &[BTreeMap<String, usize>]) -> BTreeMap<String, usize> {
    let mut totals = BTreeMap::new();
    for table in tables {
        for (label, &count) in table {
            *totals.entry(label.clone()).or_default() += count;
        }
    }
    totals
}

fn fold_counts<F: Fn(&str) -> bool>(
    counts: &BTreeMap<String, usize>,
    is_other: F,
) -> BTreeMap<String, usize> {
    let mut folded: BTreeMap<String, usize> = BTreeMap::new();
    for (label, &count) in counts {
        let key = if is_other(label) { OTHER_LABEL } else { label };
        *folded.entry(key.to_string()).or_default() += count;
    }
    folded
}

fn version_counts(version: &str, rows: &[&ImpactRecord]) -> VersionImpactCounts {
    let rated = rows.iter().filter(|r| r.is_rated()).count();
    VersionImpactCounts {
        version: version.to_string(),
        total_comments: rows.len(),
        rated_comments: rated,
        unrated_comments: rows.len() - rated,
        total_impacts: rows.iter().map(|r| r.impacts.len()).sum(),
    }
}

fn breakdown(version: &str, counts: &BTreeMap<String, usize>) -> VersionBreakdown {
    let total: usize = counts.values().sum();
    let mut entries: Vec<(&String, usize)> = counts.iter().map(|(label, &c)| (label, c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    VersionBreakdown {
        version: version.to_string(),
        impacts: entries
            .into_iter()
            .map(|(label, count)| ImpactCount {
                impact: label.clone(),
                count,
                percentage: percentage(count, total),
            })
            .collect(),
    }
}

/// Shared slice order for the chart panels
///
/// Labels are ordered by the sort version's counts (descending, ties
/// alphabetical); labels the sort version lacks follow alphabetically, so
/// every panel shows every label and colors line up across panels.
fn chart_order(
    breakdowns: &[VersionBreakdown],
    sort_version: SortVersion,
    other_position: OtherPosition,
) -> Vec<String> {
    let primary_idx = match sort_version {
        SortVersion::V1 => 0,
        SortVersion::V2 => 1,
    };

    let mut order: Vec<String> = breakdowns[primary_idx]
        .impacts
        .iter()
        .map(|i| i.impact.clone())
        .collect();
    for (idx, breakdown) in breakdowns.iter().enumerate() {
        if idx == primary_idx {
            continue;
        }
        let mut missing: Vec<&str> = breakdown
            .impacts
            .iter()
            .map(|i| i.impact.as_str())
            .filter(|label| !order.iter().any(|l| l == label))
            .collect();
        missing.sort_unstable();
        order.extend(missing.into_iter().map(str::to_string));
    }

    if other_position == OtherPosition::End {
        if let Some(pos) = order.iter().position(|l| l == OTHER_LABEL) {
            let other = order.remove(pos);
            order.push(other);
        }
    }
    order
}

/// Render the post-grouping impact distribution as an SVG chart
pub fn render_chart(
    report: &ImpactsReport,
    sort_version: SortVersion,
    other_position: OtherPosition,
    chart_type: ChartType,
    style: report::ChartStyle,
) -> String {
    let order = chart_order(&report.after, sort_version, other_position);
    fn counts_for(breakdown: &VersionBreakdown) -> BTreeMap<&str, usize> {
        breakdown
            .impacts
            .iter()
            .map(|i| (i.impact.as_str(), i.count))
            .collect()
    }

    match chart_type {
        ChartType::Pie => {
            let panels: Vec<PiePanel> = report
                .after
                .iter()
                .map(|breakdown| {
                    let counts = counts_for(breakdown);
                    let total: usize = counts.values().sum();
                    PiePanel {
                        title: breakdown.version.clone(),
                        center_label: (style == report::ChartStyle::Donut)
                            .then(|| format!("n = {total}")),
                        slices: order
                            .iter()
                            .map(|label| PieSlice {
                                label: label.clone(),
                                value: counts.get(label.as_str()).copied().unwrap_or(0) as f64,
                            })
                            .collect(),
                    }
                })
                .collect();
            render_pie_chart(
                "Comment Impact Distribution by Version",
                "Impacts",
                &panels,
                style,
            )
        }
        ChartType::Bar => {
            let series: Vec<BarSeries> = report
                .after
                .iter()
                .map(|breakdown| {
                    let counts = counts_for(breakdown);
                    let total: usize = counts.values().sum();
                    BarSeries {
                        name: breakdown.version.clone(),
                        values: order
                            .iter()
                            .map(|label| {
                                percentage(counts.get(label.as_str()).copied().unwrap_or(0), total)
                            })
                            .collect(),
                    }
                })
                .collect();
            render_grouped_bar_chart(
                "Comment Impact Distribution by Version",
                "Percentage of Impacts (%)",
                "Publishing Version",
                &order,
                &series,
            )
        }
    }
}

impl ImpactsReport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing impacts report")
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "\n{}\n",
            heading("Statistics Before Grouping into 'Other'")
        ));
        self.push_statistics(&mut out, &self.before);
        out.push_str(&format!(
            "\n{}\n",
            heading("Statistics After Grouping into 'Other'")
        ));
        self.push_statistics(&mut out, &self.after);
        out
    }

    fn push_statistics(&self, out: &mut String, breakdowns: &[VersionBreakdown]) {
        out.push_str(&format!("\n{}\n\n", heading("Comment Impact Statistics")));
        out.push_str("Comment and Impact Counts by Version:\n");
        out.push_str(&format!("{:<30} {:>10} {:>10}\n", "Metric", "v1.0", "v2.0"));
        out.push_str(&rule(50));
        out.push('\n');
        let (v1, v2) = (&self.counts[0], &self.counts[1]);
        for (metric, a, b) in [
            ("Total Comments", v1.total_comments, v2.total_comments),
            ("Rated Comments", v1.rated_comments, v2.rated_comments),
            ("Unrated Comments", v1.unrated_comments, v2.unrated_comments),
            ("Total Impacts", v1.total_impacts, v2.total_impacts),
        ] {
            out.push_str(&format!("{metric:<30} {a:>10} {b:>10}\n"));
        }

        out.push_str("\nDetailed Impact Breakdown by Version:\n");
        for breakdown in breakdowns {
            out.push_str(&format!("\n{}:\n", breakdown.version));
            if breakdown.impacts.is_empty() {
                out.push_str("No rated impacts.\n");
                continue;
            }
            out.push_str(&format!(
                "{:<45} {:>8} {:>12}\n",
                "Impact Type", "Count", "Percentage"
            ));
            out.push_str(&rule(65));
            out.push('\n');
            for impact in &breakdown.impacts {
                out.push_str(&format!(
                    "{:<45} {:>8} {:>11.1}%\n",
                    impact.impact, impact.count, impact.percentage
                ));
            }
            out.push_str(&rule(65));
            out.push('\n');
            let total: usize = breakdown.impacts.iter().map(|i| i.count).sum();
            out.push_str(&format!("{:<45} {:>8} {:>11.1}%\n", "Total", total, 100.0));
        }
    }
}
