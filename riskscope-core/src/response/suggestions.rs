//! Follow-up question extraction from answer prose
//!
//! Used when the structured payload carries no `suggested_questions`.

use super::normalizer::NormalizedResponse;
use crate::config::constants::suggestions::{INLINE_MAX, MIN_QUESTION_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;

/// Headings the agent uses to introduce inline follow-ups, tried in order
#[allow(clippy::expect_used)]
static INLINE_HEADINGS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)You might also want to ask:\s*([\s\S]*?)(?:\n\n|$)",
        r"(?i)Suggested follow-up questions?:\s*([\s\S]*?)(?:\n\n|$)",
        r"(?i)Next questions?:\s*([\s\S]*?)(?:\n\n|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("inline heading pattern"))
    .collect()
});

#[allow(clippy::expect_used)]
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s*").expect("bullet pattern"));

#[allow(clippy::expect_used)]
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]").expect("numbered pattern"));

#[allow(clippy::expect_used)]
static DASH_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s*").expect("dash pattern"));

/// Questions listed under a "You might also want to ask:" style heading.
///
/// Headings are tried in order and the first one yielding any question
/// wins. Lines must be longer than ten characters and contain a `?`. At most
/// four are returned.
pub fn extract_inline_suggestions(text: &str) -> Vec<String> {
    INLINE_HEADINGS
        .iter()
        .filter_map(|heading| heading.captures(text)?.get(1))
        .map(|block| questions_in_block(block.as_str()))
        .find(|questions| !questions.is_empty())
        .unwrap_or_default()
}

fn questions_in_block(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| BULLET.replace(line, "").into_owned())
        .filter(|line| is_long_enough(line) && line.contains('?'))
        .take(INLINE_MAX)
        .collect()
}

/// Lines of a response that is just a list of questions.
///
/// Numbered lines are dropped, a leading `-` or `*` is removed and short
/// lines are skipped.
pub fn extract_listed_questions(text: &str, cap: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !NUMBERED.is_match(line))
        .map(|line| DASH_BULLET.replace(line, "").trim().to_string())
        .filter(|line| is_long_enough(line))
        .take(cap)
        .collect()
}

/// Structured suggestions when present, inline ones otherwise
pub fn resolve_suggestions(response: &NormalizedResponse) -> Vec<String> {
    if response.has_suggestions() {
        response.suggested_questions.clone()
    } else {
        extract_inline_suggestions(&response.content)
    }
}

fn is_long_enough(line: &str) -> bool {
    line.chars().count() > MIN_QUESTION_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::normalizer::DecodeStrategy;

    fn plain(content: &str) -> NormalizedResponse {
        NormalizedResponse {
            content: content.to_string(),
            suggested_questions: Vec::new(),
            raw: None,
            source: DecodeStrategy::PlainText,
        }
    }

    #[test]
    fn test_inline_block_until_blank_line() {
        let text = "Retention is seven years.\n\nYou might also want to ask:\n- What about backups?\n* Who approves deletion?\n• Short?\nNot a question at all\n\n- Is this ignored?";
        assert_eq!(
            extract_inline_suggestions(text),
            vec!["What about backups?", "Who approves deletion?"]
        );
    }

    #[test]
    fn test_inline_heading_variants() {
        let text = "Done.\nSuggested follow-up question: Which controls are missing?";
        assert_eq!(
            extract_inline_suggestions(text),
            vec!["Which controls are missing?"]
        );

        let text = "NEXT QUESTIONS:\n- How is access reviewed?";
        assert_eq!(extract_inline_suggestions(text), vec!["How is access reviewed?"]);
    }

    #[test]
    fn test_heading_without_questions_tries_next_heading() {
        let text = "You might also want to ask:\nsee below\n\nNext questions:\n- What about vendor audits?";
        assert_eq!(
            extract_inline_suggestions(text),
            vec!["What about vendor audits?"]
        );
    }

    #[test]
    fn test_inline_is_capped_at_four() {
        let text = "You might also want to ask:\n- Question one?\n- Question two?\n- Question three?\n- Question four?\n- Question five?";
        assert_eq!(extract_inline_suggestions(text).len(), 4);
    }

    #[test]
    fn test_no_heading_no_suggestions() {
        assert!(extract_inline_suggestions("What is GDPR? It is a regulation.").is_empty());
    }

    #[test]
    fn test_listed_questions_skip_numbered_and_short_lines() {
        let text = "1. Overview\n- What does the policy cover?\n\n* Who owns the data map?\nshort\n2) Details";
        assert_eq!(
            extract_listed_questions(text, 8),
            vec!["What does the policy cover?", "Who owns the data map?"]
        );
        assert_eq!(extract_listed_questions(text, 1).len(), 1);
    }

    #[test]
    fn test_resolve_prefers_structured() {
        let mut response = plain("You might also want to ask:\n- Inline question here?");
        assert_eq!(resolve_suggestions(&response), vec!["Inline question here?"]);

        response.suggested_questions = vec!["Structured?".into()];
        assert_eq!(resolve_suggestions(&response), vec!["Structured?"]);
    }
}
