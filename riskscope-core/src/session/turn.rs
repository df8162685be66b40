use crate::config::constants::messages::ERROR_PREFIX;
use crate::response::{Citation, NormalizedResponse, normalize_markdown, split_citations};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of a conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    /// RFC 3339, UTC
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), Vec::new(), false)
    }

    /// Assistant answer split into display prose and its citations
    pub fn assistant(answer: &str) -> Self {
        let (prose, citations) = split_citations(&normalize_markdown(answer));
        Self::new(Role::Assistant, prose, citations, false)
    }

    pub fn from_response(response: &NormalizedResponse) -> Self {
        Self::assistant(&response.content)
    }

    /// Inline error-flagged assistant turn
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::new(
            Role::Assistant,
            format!("{ERROR_PREFIX}{message}"),
            Vec::new(),
            true,
        )
    }

    fn new(role: Role, content: String, citations: Vec<Citation>, is_error: bool) -> Self {
        Self {
            role,
            content,
            citations,
            timestamp: Utc::now().to_rfc3339(),
            is_error,
        }
    }
}
