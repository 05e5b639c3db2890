//! Main-text extraction from article HTML
//!
//! Publication pages wrap the prose in `<p>` tags alongside a comment
//! section, table wrappers, figures, and a share-prompt blockquote. Scoring
//! those regions would skew every metric, so paragraphs inside them are
//! dropped, along with short or link-heavy blocks that are navigation
//! rather than prose.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

const SHARE_PROMPT: &str = "Share your thoughts!";
const MIN_BLOCK_CHARS: usize = 25;
const MAX_LINK_DENSITY: f64 = 0.33;

fn paragraph_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("p").unwrap())
}

fn anchor_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("a").unwrap())
}

/// True when the paragraph sits inside a region that is not article prose
fn in_stripped_region(paragraph: &ElementRef) -> bool {
    for node in paragraph.ancestors() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        match el.value().name() {
            "figure" => return true,
            "div" => {
                let stripped = el
                    .value()
                    .classes()
                    .any(|c| c == "section-content" || c == "tableWrapper");
                if stripped {
                    return true;
                }
            }
            "blockquote" => {
                if el.text().any(|t| t.contains(SHARE_PROMPT)) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// Fraction of the paragraph's text that sits inside anchors
fn link_density(paragraph: &ElementRef) -> f64 {
    let total: usize = paragraph.text().map(str::len).sum();
    if total == 0 {
        return 0.0;
    }
    let linked: usize = paragraph
        .select(anchor_selector())
        .map(|a| a.text().map(str::len).sum::<usize>())
        .sum();
    linked as f64 / total as f64
}

/// Extract the article prose from a page, one paragraph per block
///
/// Headings never contribute because only `<p>` elements are considered.
/// Returns an empty string when nothing survives the filters.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut blocks = Vec::new();
    for paragraph in document.select(paragraph_selector()) {
        if in_stripped_region(&paragraph) {
            continue;
        }
        let raw: String = paragraph.text().collect();
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.len() < MIN_BLOCK_CHARS {
            continue;
        }
        if link_density(&paragraph) > MAX_LINK_DENSITY {
            continue;
        }
        blocks.push(text);
    }
    blocks.join("\n\n")
}
