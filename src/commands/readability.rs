//! `readability` subcommand: score an article fetched from a URL
//!
//! Fetches the page (honoring robots.txt unless told otherwise), strips
//! boilerplate down to the article paragraphs, and prints the readability
//! metrics.

use crate::cli::ReadabilityArgs;
use crate::fetch::fetch_article;
use crate::readability::{extract_article_text, score, ReadabilityReport};
use crate::report::heading;

pub fn run(args: &ReadabilityArgs) -> anyhow::Result<()> {
    let html = fetch_article(&args.url, args.skip_robots)?;
    let text = extract_article_text(&html);
    tracing::debug!("extracted {} characters of article text", text.chars().count());
    if text.trim().is_empty() {
        anyhow::bail!("no article text extracted from {}", args.url);
    }

    let report = score(&text)?;
    print!("{}", render_text(text.chars().count(), &report));
    Ok(())
}

fn render_text(text_length: usize, report: &ReadabilityReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", heading("Readability Metrics")));
    out.push_str(&format!("Text length: {text_length} characters\n"));
    out.push_str(&format!(
        "Flesch Reading Ease: {:.2}\n",
        report.flesch_reading_ease
    ));
    out.push_str(&format!(
        "Flesch-Kincaid Grade: {:.2}\n",
        report.flesch_kincaid_grade
    ));
    out.push_str(&format!("SMOG Index: {:.2}\n", report.smog_index));
    out.push_str(&format!(
        "Coleman-Liau Index: {:.2}\n",
        report.coleman_liau_index
    ));
    out.push_str(&format!(
        "Automated Readability Index: {:.2}\n",
        report.automated_readability_index
    ));
    out.push_str(&format!(
        "Readability Consensus: {:.2}\n",
        report.consensus_grade
    ));
    out.push_str(&format!("Word Count: {}\n", report.words));
    out.push_str(&format!("Sentence Count: {}\n", report.sentences));
    out.push_str(&format!(
        "Average Syllables per Word: {:.2}\n",
        report.avg_syllables_per_word
    ));
    out
}
