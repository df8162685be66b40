//! Reduce the raw `/run` event array to a single answer.
//!
//! The agent has shipped three output conventions over time. Decoders are
//! attempted in [`DECODE_PRIORITY`] order and the first one that produces a
//! response wins:
//!
//! 1. a structured object (or JSON string) in `actions.stateDelta`
//! 2. the concatenated text parts, when that text is itself a JSON object
//! 3. the concatenated text parts as-is
//!
//! Decoding never fails. Parse errors only mean a decoder did not match.

use crate::agent::models::RawAgentEvent;
use crate::config::constants::messages::NO_RESPONSE;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// State delta keys that may hold the structured answer, highest priority first
pub const STRUCTURED_OUTPUT_KEYS: [&str; 3] = ["final_response", "result", "output"];

/// Which decoder produced a [`NormalizedResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    StructuredState,
    JsonText,
    PlainText,
}

pub const DECODE_PRIORITY: [DecodeStrategy; 3] = [
    DecodeStrategy::StructuredState,
    DecodeStrategy::JsonText,
    DecodeStrategy::PlainText,
];

/// Answer text, follow-up suggestions and the structured payload they came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    pub content: String,
    pub suggested_questions: Vec<String>,
    /// Structured object the answer was decoded from, if any
    pub raw: Option<Value>,
    pub source: DecodeStrategy,
}

impl NormalizedResponse {
    pub fn has_suggestions(&self) -> bool {
        !self.suggested_questions.is_empty()
    }
}

#[allow(clippy::expect_used)]
static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```json[ \t]*\r?\n?(.*?)```").expect("json fence pattern")
});

/// A fence with no language tag
#[allow(clippy::expect_used)]
static BARE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[ \t]*\r?\n(.*?)```").expect("bare fence pattern"));

/// Normalize one response; `max_suggestions` caps the follow-up list
pub fn normalize(events: &[RawAgentEvent], max_suggestions: usize) -> NormalizedResponse {
    let text = concatenated_text(events);

    for strategy in DECODE_PRIORITY {
        let decoded = match strategy {
            DecodeStrategy::StructuredState => decode_structured_state(events, max_suggestions),
            DecodeStrategy::JsonText => decode_json_text(&text, max_suggestions),
            DecodeStrategy::PlainText => Some(decode_plain_text(&text)),
        };
        if let Some(response) = decoded {
            debug!(
                source = ?response.source,
                suggestions = response.suggested_questions.len(),
                "normalized agent response"
            );
            return response;
        }
    }

    // PlainText always decodes; kept for exhaustiveness.
    decode_plain_text(&text)
}

fn concatenated_text(events: &[RawAgentEvent]) -> String {
    events.iter().flat_map(|event| event.texts()).collect()
}

fn decode_structured_state(
    events: &[RawAgentEvent],
    max_suggestions: usize,
) -> Option<NormalizedResponse> {
    // The first qualifying key ends the scan, even when its value is unusable.
    let (key, value) = events.iter().find_map(|event| {
        STRUCTURED_OUTPUT_KEYS
            .iter()
            .find_map(|key| event.state_value(key).map(|value| (*key, value)))
    })?;

    let object = match value {
        Value::String(encoded) => {
            let parsed = parse_json_string(encoded);
            if parsed.is_none() {
                debug!(key, "structured state value is not decodable JSON");
            }
            parsed?
        }
        Value::Object(map) => map.clone(),
        _ => {
            debug!(key, "structured state value is not an object");
            return None;
        }
    };

    Some(from_object(object, max_suggestions, DecodeStrategy::StructuredState))
}

fn decode_json_text(text: &str, max_suggestions: usize) -> Option<NormalizedResponse> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Some(from_object(map, max_suggestions, DecodeStrategy::JsonText)),
        _ => None,
    }
}

fn decode_plain_text(text: &str) -> NormalizedResponse {
    let content = if text.is_empty() {
        NO_RESPONSE.to_string()
    } else {
        text.to_string()
    };
    NormalizedResponse {
        content,
        suggested_questions: Vec::new(),
        raw: None,
        source: DecodeStrategy::PlainText,
    }
}

/// `json` fenced blocks first, untagged fences only when there is no `json`
/// fence, then the whole string. Only objects count.
fn parse_json_string(encoded: &str) -> Option<Map<String, Value>> {
    let mut fenced = fence_bodies(&JSON_FENCE, encoded);
    if fenced.is_empty() {
        fenced = fence_bodies(&BARE_FENCE, encoded);
    }

    fenced
        .into_iter()
        .chain(std::iter::once(encoded))
        .find_map(|candidate| match serde_json::from_str::<Value>(candidate.trim()) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
}

fn fence_bodies<'a>(fence: &Regex, text: &'a str) -> Vec<&'a str> {
    fence
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|body| body.as_str())
        .collect()
}

fn from_object(
    object: Map<String, Value>,
    max_suggestions: usize,
    source: DecodeStrategy,
) -> NormalizedResponse {
    let content = ["result", "content"]
        .iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()))
        .map(value_to_text)
        .unwrap_or_else(|| Value::Object(object.clone()).to_string());

    let suggested_questions = object
        .get("suggested_questions")
        .and_then(Value::as_array)
        .map(|questions| {
            questions
                .iter()
                .filter_map(Value::as_str)
                .take(max_suggestions)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    NormalizedResponse {
        content,
        suggested_questions,
        raw: Some(Value::Object(object)),
        source,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
