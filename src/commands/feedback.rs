//! `feedback` subcommand: reader survey analysis
//!
//! Cross-tabulates each survey question against the publishing version,
//! tests the tables for independence, and corrects the family of p-values
//! for multiple testing. A temporal section tracks monthly submission counts
//! and per-version averages.

use std::collections::BTreeMap;
use std::fs::File;

use anyhow::Context;
use serde::Serialize;

use crate::analysis::{
    benjamini_hochberg, bonferroni, chi_squared_independence, AnalysisConfig, ContingencyTable,
    TestResult,
};
use crate::cli::{FeedbackArgs, OutputFormat};
use crate::dataset::{load_feedback, FeedbackRecord, FEEDBACK_QUESTIONS};
use crate::report::{count_pct, fmt_p, rule};

/// Outcome of the multiple-testing corrections for one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    SignificantAfterBonferroni,
    SignificantAfterFdr,
    NotSignificant,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignificantAfterBonferroni => {
                write!(f, "Significant after Bonferroni correction.")
            }
            Self::SignificantAfterFdr => write!(f, "Significant after FDR correction."),
            Self::NotSignificant => {
                write!(f, "Not significant after multiple testing correction.")
            }
        }
    }
}

/// How many of a version's responses answered one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRate {
    pub version: String,
    pub answered: usize,
    pub total: usize,
}

/// One question's cross-tabulation and test results
#[derive(Debug, Clone, Serialize)]
pub struct QuestionAnalysis {
    pub question: String,
    pub table: ContingencyTable,
    pub response_rates: Vec<ResponseRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TestResult>,
    /// Why the test did not run, when it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_bonferroni: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_fdr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionCount {
    pub version: String,
    pub count: usize,
}

/// Submission counts for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCounts {
    /// `YYYY-MM`
    pub month: String,
    pub counts: Vec<VersionCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAverage {
    pub version: String,
    /// Mean submissions over the months in which this version received any
    pub average: f64,
    /// Share of the summed per-version averages, in percent
    pub share: f64,
    pub months_with_data: usize,
}

/// Full feedback analysis, serializable as the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    pub version: String,
    pub format: String,
    pub total_responses: usize,
    pub version_counts: Vec<VersionCount>,
    /// Rows whose submission timestamp was blank or unparseable
    pub missing_dates: usize,
    pub questions: Vec<QuestionAnalysis>,
    pub monthly: Vec<MonthlyCounts>,
    pub monthly_averages: Vec<MonthlyAverage>,
}

pub fn run(args: &FeedbackArgs) -> anyhow::Result<()> {
    let config = AnalysisConfig::default();
    let file = File::open(&args.csv).with_context(|| format!("opening {}", args.csv.display()))?;
    let records =
        load_feedback(file).with_context(|| format!("loading {}", args.csv.display()))?;
    tracing::debug!("loaded {} feedback responses", records.len());

    let report = build_report(&records, &config);
    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

/// Run every feedback analysis over the survey export
///
/// The multiple-testing corrections are computed over the questions whose
/// test actually ran; a degenerate table shrinks the family rather than
/// aborting the report.
pub fn build_report(records: &[FeedbackRecord], config: &AnalysisConfig) -> FeedbackReport {
    let mut version_tally: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        if let Some(version) = r.version.as_deref() {
            *version_tally.entry(version).or_default() += 1;
        }
    }

    let mut version_counts: Vec<VersionCount> = version_tally
        .iter()
        .map(|(version, count)| VersionCount {
            version: version.to_string(),
            count: *count,
        })
        .collect();
    version_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.version.cmp(&b.version)));

    let mut questions: Vec<QuestionAnalysis> = FEEDBACK_QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, question)| analyze_question(records, &version_tally, index, question))
        .collect();

    let raw: Vec<f64> = questions
        .iter()
        .filter_map(|q| q.test.as_ref().map(|t| t.p_value))
        .collect();
    let p_bonferroni = bonferroni(&raw);
    let q_fdr = benjamini_hochberg(&raw);
    let mut tested = 0;
    for question in &mut questions {
        if question.test.is_some() {
            let (p, q) = (p_bonferroni[tested], q_fdr[tested]);
            question.p_bonferroni = Some(p);
            question.q_fdr = Some(q);
            question.verdict = Some(verdict_for(p, q, config.significance_level));
            tested += 1;
        }
    }

    let monthly = monthly_counts(records);
    let monthly_averages = monthly_averages(&monthly);

    FeedbackReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        format: "pubstats-feedback-v1".to_string(),
        total_responses: records.len(),
        version_counts,
        missing_dates: records.iter().filter(|r| r.submitted.is_none()).count(),
        questions,
        monthly,
        monthly_averages,
    }
}

fn analyze_question(
    records: &[FeedbackRecord],
    version_tally: &BTreeMap<&str, usize>,
    index: usize,
    question: &str,
) -> QuestionAnalysis {
    let pairs: Vec<(&str, &str)> = records
        .iter()
        .filter_map(|r| {
            let version = r.version.as_deref()?;
            let answer = r.answer(index)?;
            Some((version, answer))
        })
        .collect();
    let table = ContingencyTable::from_pairs(pairs);

    let response_rates = version_tally
        .iter()
        .map(|(&version, &total)| ResponseRate {
            version: version.to_string(),
            answered: records
                .iter()
                .filter(|r| r.version.as_deref() == Some(version) && r.answer(index).is_some())
                .count(),
            total,
        })
        .collect();

    let (test, skipped) = match chi_squared_independence(&table) {
        Ok(test) => (Some(test), None),
        Err(err) => (None, Some(err.to_string())),
    };

    QuestionAnalysis {
        question: question.to_string(),
        table,
        response_rates,
        test,
        skipped,
        p_bonferroni: None,
        q_fdr: None,
        verdict: None,
    }
}

fn verdict_for(p_bonferroni: f64, q_fdr: f64, alpha: f64) -> Verdict {
    if p_bonferroni < alpha {
        Verdict::SignificantAfterBonferroni
    } else if q_fdr < alpha {
        Verdict::SignificantAfterFdr
    } else {
        Verdict::NotSignificant
    }
}

fn monthly_counts(records: &[FeedbackRecord]) -> Vec<MonthlyCounts> {
    let mut months: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for r in records {
        if let (Some(month), Some(version)) = (r.month(), r.version.clone()) {
            *months.entry(month).or_default().entry(version).or_default() += 1;
        }
    }
    months
        .into_iter()
        .map(|(month, counts)| MonthlyCounts {
            month,
            counts: counts
                .into_iter()
                .map(|(version, count)| VersionCount { version, count })
                .collect(),
        })
        .collect()
}

fn monthly_averages(monthly: &[MonthlyCounts]) -> Vec<MonthlyAverage> {
    let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for month in monthly {
        for vc in &month.counts {
            let entry = totals.entry(vc.version.as_str()).or_default();
            entry.0 += vc.count;
            entry.1 += 1;
        }
    }

    let averages: Vec<(&str, f64, usize)> = totals
        .iter()
        .map(|(version, (total, months))| (*version, *total as f64 / *months as f64, *months))
        .collect();
    let average_sum: f64 = averages.iter().map(|(_, avg, _)| avg).sum();

    averages
        .into_iter()
        .map(|(version, average, months_with_data)| MonthlyAverage {
            version: version.to_string(),
            average,
            share: if average_sum > 0.0 {
                average / average_sum * 100.0
            } else {
                0.0
            },
            months_with_data,
        })
        .collect()
}

impl FeedbackReport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing feedback report")
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Overall Statistics:\n");
        out.push_str(&format!("Total responses: {}\n", self.total_responses));
        out.push_str("\nResponses by version:\n");
        for vc in &self.version_counts {
            out.push_str(&format!(
                "{}: {}\n",
                vc.version,
                count_pct(vc.count, self.total_responses)
            ));
        }
        if self.missing_dates > 0 {
            out.push_str(&format!(
                "\nSubmissions with missing or unparseable dates: {}\n",
                self.missing_dates
            ));
        }

        out.push('\n');
        out.push_str(&"=".repeat(80));
        out.push('\n');
        out.push_str("Feedback responses: v1.0 vs. v2.0 pubs\n");
        out.push_str(&"=".repeat(80));
        out.push('\n');

        for question in &self.questions {
            push_question(&mut out, question);
        }

        out.push_str("\nTemporal Analysis:\n");
        out.push_str(&rule(50));
        out.push('\n');
        out.push_str("\nMonthly submission counts (last 10 months):\n");
        let start = self.monthly.len().saturating_sub(10);
        for month in &self.monthly[start..] {
            let total: usize = month.counts.iter().map(|vc| vc.count).sum();
            out.push_str(&format!("\n{}:\n", month.month));
            for vc in &month.counts {
                out.push_str(&format!("  {}: {}\n", vc.version, count_pct(vc.count, total)));
            }
        }
        out.push_str("\nAverage monthly submissions:\n");
        for avg in &self.monthly_averages {
            out.push_str(&format!(
                "{}: {:.1} per month ({:.1}% of monthly average) across {} months with data\n",
                avg.version, avg.average, avg.share, avg.months_with_data
            ));
        }

        out
    }
}

fn push_question(out: &mut String, question: &QuestionAnalysis) {
    out.push_str(&format!("\n{}\n", rule(80)));
    out.push_str(&format!("Question: {}\n", question.question));
    out.push_str(&rule(80));
    out.push('\n');
    push_crosstab(out, &question.table);

    out.push_str("\nResponse rates:\n");
    for rate in &question.response_rates {
        out.push_str(&format!(
            "{}: {}\n",
            rate.version,
            count_pct(rate.answered, rate.total)
        ));
    }

    out.push_str(&format!("\n{}\n", rule(50)));
    out.push_str(&format!("Test results (N={}):\n", question.table.grand_total()));
    if let Some(test) = &question.test {
        out.push_str(&format!(
            "   - Raw Chi-squared p-value:         {}\n",
            fmt_p(test.p_value)
        ));
        if let Some(p) = question.p_bonferroni {
            out.push_str(&format!(
                "   - Bonferroni-corrected p-value:    {}\n",
                fmt_p(p)
            ));
        }
        if let Some(q) = question.q_fdr {
            out.push_str(&format!(
                "   - Benjamini-Hochberg FDR q-value:  {}\n",
                fmt_p(q)
            ));
        }
        if let Some(verdict) = question.verdict {
            out.push_str(&format!("   - {verdict}\n"));
        }
    } else if let Some(reason) = &question.skipped {
        out.push_str(&format!("   - Chi-squared test not run: {reason}\n"));
    }
}

/// Version-by-answer matrix with row-normalized percentages
fn push_crosstab(out: &mut String, table: &ContingencyTable) {
    if table.is_empty() {
        out.push_str("No answers recorded.\n");
        return;
    }

    let cells: Vec<Vec<String>> = (0..table.rows.len())
        .map(|i| {
            let row_total = table.row_total(i) as usize;
            (0..table.cols.len())
                .map(|j| count_pct(table.count(i, j) as usize, row_total))
                .collect()
        })
        .collect();

    let label_width = table.rows.iter().map(String::len).max().unwrap_or(0);
    let col_widths: Vec<usize> = table
        .cols
        .iter()
        .enumerate()
        .map(|(j, name)| {
            cells
                .iter()
                .map(|row| row[j].len())
                .chain([name.len()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut line = format!("{:<label_width$}", "");
    for (j, name) in table.cols.iter().enumerate() {
        line.push_str(&format!("  {:<width$}", name, width = col_widths[j]));
    }
    out.push_str(line.trim_end());
    out.push('\n');

    for (i, label) in table.rows.iter().enumerate() {
        let mut line = format!("{label:<label_width$}");
        for (j, cell) in cells[i].iter().enumerate() {
            line.push_str(&format!("  {:<width$}", cell, width = col_widths[j]));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}
