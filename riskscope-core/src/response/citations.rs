//! Citation trailer parsing
//!
//! Agent answers end with a conventional trailer:
//!
//! ```text
//! **Sources:**
//!
//! **policy.pdf**
//! > first quoted line
//! > second quoted line
//! ```
//!
//! Quoted lines of one block are joined with a single space. Both functions
//! are total: malformed input yields an empty list or the trimmed input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)]
static SOURCES_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*Sources:\*\*").expect("sources marker pattern"));

/// A bold label line followed by one or more `>` quoted lines.
/// Labels never span lines and stop at the first closing `**`.
#[allow(clippy::expect_used)]
static CITATION_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^*\n]*)\*\*\s*\n((?:[ \t]*>[^\n]*(?:\n|$))+)")
        .expect("citation block pattern")
});

#[allow(clippy::expect_used)]
static QUOTE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*>\s*").expect("quote prefix pattern"));

/// One `(source, excerpt)` pair from the sources trailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub content: String,
}

/// Extract citations from the first `**Sources:**` section, in order
pub fn extract_citations(markdown: &str) -> Vec<Citation> {
    let Some(marker) = SOURCES_MARKER.find(markdown) else {
        return Vec::new();
    };
    let section = &markdown[marker.end()..];

    CITATION_BLOCK
        .captures_iter(section)
        .map(|captures| {
            let source = captures
                .get(1)
                .map(|label| label.as_str().trim())
                .unwrap_or_default()
                .to_string();
            let content = captures
                .get(2)
                .map(|quoted| join_quoted_lines(quoted.as_str()))
                .unwrap_or_default();
            Citation { source, content }
        })
        .collect()
}

/// Display prose: everything before the sources marker, trimmed
pub fn strip_citations(markdown: &str) -> String {
    match SOURCES_MARKER.find(markdown) {
        Some(marker) => markdown[..marker.start()].trim().to_string(),
        None => markdown.trim().to_string(),
    }
}

/// Prose and citations in one pass
pub fn split_citations(markdown: &str) -> (String, Vec<Citation>) {
    (strip_citations(markdown), extract_citations(markdown))
}

fn join_quoted_lines(block: &str) -> String {
    block
        .lines()
        .map(|line| QUOTE_PREFIX.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
