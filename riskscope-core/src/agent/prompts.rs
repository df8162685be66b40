//! Request texts for the corpus and compliance operations the agent exposes.
//!
//! The agent is driven by natural language only, so every operation is a
//! formatted message sent through the regular `/run` call.

pub fn list_corpora() -> String {
    "List all available corpora".to_string()
}

pub fn add_document<S: AsRef<str>>(corpus: &str, paths: &[S]) -> String {
    format!(
        "Add the following documents to the {corpus} corpus: {}",
        join(paths)
    )
}

pub fn corpus_info(corpus: &str) -> String {
    format!("Get information about the {corpus} corpus")
}

/// Compliance analysis request; the query is sent unchanged when no
/// regulation is named.
pub fn analyze_risk<S: AsRef<str>>(query: &str, regulations: &[S]) -> String {
    if regulations.is_empty() {
        return query.to_string();
    }
    format!(
        "Analyze the following for compliance with {}: {query}",
        join(regulations)
    )
}

/// Restrict a free-form question to a single corpus
pub fn corpus_scoped(corpus: &str, text: &str) -> String {
    format!(
        "[CORPUS FILTER: {corpus} ONLY] {text}\n\nIMPORTANT: Only query the {corpus} corpus. Do not query any other corpus."
    )
}

/// Ask the agent for follow-up questions grounded in one corpus.
///
/// The reply is expected as a structured object whose `suggested_questions`
/// holds the questions.
pub fn corpus_questions(corpus: &str, count: usize) -> String {
    let prompt = format!(
        "Query the {corpus} knowledge base and generate {count} relevant questions based on the actual content available.

CRITICAL: You MUST return your response as JSON with the questions in the \"suggested_questions\" array:

{{
  \"result\": \"Brief summary of what's in the knowledge base\",
  \"suggested_questions\": [\"Question 1?\", \"Question 2?\"]
}}

IMPORTANT:
1. Query the {corpus} knowledge base to see what content exists
2. Only suggest questions about content that is actually present
3. Make questions specific and actionable
4. Put ALL {count} questions in the \"suggested_questions\" array, not in the \"result\" field"
    );
    format!("[CORPUS FILTER: {corpus} ONLY] {prompt}")
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_document_joins_paths() {
        assert_eq!(
            add_document("data_v1", &["gs://bucket/a.pdf", "gs://bucket/b.pdf"]),
            "Add the following documents to the data_v1 corpus: gs://bucket/a.pdf, gs://bucket/b.pdf"
        );
    }

    #[test]
    fn test_analyze_risk_without_regulations_is_passthrough() {
        let none: [&str; 0] = [];
        assert_eq!(analyze_risk("Review vendor contract", &none), "Review vendor contract");
        assert_eq!(
            analyze_risk("Review vendor contract", &["GDPR", "SOX"]),
            "Analyze the following for compliance with GDPR, SOX: Review vendor contract"
        );
    }

    #[test]
    fn test_corpus_scoped_names_corpus_twice() {
        let text = corpus_scoped("policies", "What is the retention period?");
        assert!(text.starts_with("[CORPUS FILTER: policies ONLY] What is the retention period?"));
        assert!(text.ends_with("Only query the policies corpus. Do not query any other corpus."));
    }

    #[test]
    fn test_corpus_questions_is_filtered() {
        let text = corpus_questions("data_v1", 8);
        assert!(text.starts_with("[CORPUS FILTER: data_v1 ONLY] Query the data_v1 knowledge base"));
        assert!(text.contains("generate 8 relevant questions"));
        assert!(text.contains("\"suggested_questions\": [\"Question 1?\""));
    }

    #[test]
    fn test_fixed_prompts() {
        assert_eq!(list_corpora(), "List all available corpora");
        assert_eq!(corpus_info("data_v1"), "Get information about the data_v1 corpus");
    }
}
