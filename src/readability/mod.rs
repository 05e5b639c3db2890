//! Readability scoring for published articles
//!
//! Classic surface-level formulas (Flesch, Flesch-Kincaid, SMOG,
//! Coleman-Liau, ARI) computed from word, sentence, and syllable counts.
//! The consensus grade is the median of the four grade-level metrics.

pub mod extract;
pub mod syllables;

pub use extract::extract_article_text;
pub use syllables::count_syllables;

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::analysis::quantile;
use crate::error::{AnalysisError, Result};

/// Readability metrics for one passage of text
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityReport {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub avg_syllables_per_word: f64,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub smog_index: f64,
    pub coleman_liau_index: f64,
    pub automated_readability_index: f64,
    /// Median of the grade-level metrics (FK, SMOG, Coleman-Liau, ARI)
    pub consensus_grade: f64,
}

fn sentence_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").unwrap())
}

/// Count sentences as boundary-delimited chunks containing letters
pub fn count_sentences(text: &str) -> usize {
    sentence_boundary()
        .split(text)
        .filter(|chunk| chunk.chars().any(char::is_alphabetic))
        .count()
}

/// Score a passage of plain text
///
/// Returns an error when the text contains no words, since every formula
/// divides by the word count.
pub fn score(text: &str) -> Result<ReadabilityReport> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .collect();
    let words = tokens.len();
    if words == 0 {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let sentences = count_sentences(text).max(1);
    let syllables: usize = tokens.iter().map(|t| count_syllables(t)).sum();
    let polysyllables = tokens
        .iter()
        .filter(|t| syllables::is_polysyllabic(t))
        .count();
    let letters: usize = tokens
        .iter()
        .map(|t| t.chars().filter(|c| c.is_alphabetic()).count())
        .sum();
    let chars: usize = tokens
        .iter()
        .map(|t| t.chars().filter(|c| c.is_alphanumeric()).count())
        .sum();

    let w = words as f64;
    let s = sentences as f64;
    let words_per_sentence = w / s;
    let syllables_per_word = syllables as f64 / w;

    let flesch_reading_ease =
        206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let flesch_kincaid_grade =
        0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;
    let smog_index = 1.0430 * (polysyllables as f64 * 30.0 / s).sqrt() + 3.1291;
    let letters_per_100 = 100.0 * letters as f64 / w;
    let sentences_per_100 = 100.0 * s / w;
    let coleman_liau_index =
        0.0588 * letters_per_100 - 0.296 * sentences_per_100 - 15.8;
    let automated_readability_index =
        4.71 * (chars as f64 / w) + 0.5 * words_per_sentence - 21.43;

    let mut grades = [
        flesch_kincaid_grade,
        smog_index,
        coleman_liau_index,
        automated_readability_index,
    ];
    grades.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let consensus_grade = quantile(&grades, 0.5);

    Ok(ReadabilityReport {
        words,
        sentences,
        syllables,
        avg_syllables_per_word: syllables_per_word,
        flesch_reading_ease,
        flesch_kincaid_grade,
        smog_index,
        coleman_liau_index,
        automated_readability_index,
        consensus_grade,
    })
}
