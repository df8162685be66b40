use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static EXCESS_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank line pattern"));

#[allow(clippy::expect_used)]
static INDENTED_TABLE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]+\|").expect("table row pattern"));

/// Clean up agent markdown before display or citation extraction.
///
/// Agents sometimes return escaped control sequences (`\n`, `\t` as two
/// characters) and indented table rows that renderers do not recognise.
pub fn normalize_markdown(raw: &str) -> String {
    let text = raw
        .replace("\\n", "\n")
        .replace("\\t", "    ")
        .replace("\r\n", "\n");
    let text = EXCESS_BLANK_LINES.replace_all(&text, "\n\n");
    let text = INDENTED_TABLE_ROW.replace_all(&text, "\n|");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_sequences_are_expanded() {
        assert_eq!(normalize_markdown(r"a\nb\tc"), "a\nb    c");
    }

    #[test]
    fn test_blank_runs_collapse_and_tables_unindent() {
        let raw = "Title\r\n\r\n\r\n\r\n| a | b |\n   | - | - |\n\t| 1 | 2 |\n\n";
        assert_eq!(
            normalize_markdown(raw),
            "Title\n\n| a | b |\n| - | - |\n| 1 | 2 |"
        );
    }
}
