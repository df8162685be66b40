//! Wire models exchanged with the agent server
//!
//! The server returns an array of loosely structured events per `/run` call.
//! Every field is optional and unknown fields are ignored so that events
//! produced by newer agent versions still decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// One element of the event array returned by `/run`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAgentEvent {
    /// Name of the (sub-)agent that produced the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<EventContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<EventActions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub parts: Vec<EventPart>,
}

/// Treat an explicit `null` like a missing field
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A content fragment; only the text form matters to the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_delta: Option<Map<String, Value>>,
}

impl RawAgentEvent {
    /// Event carrying a single text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Some(EventContent {
                role: Some("model".to_string()),
                parts: vec![EventPart {
                    text: Some(text.into()),
                }],
            }),
            ..Default::default()
        }
    }

    /// Event carrying a single state delta entry
    pub fn state(key: impl Into<String>, value: Value) -> Self {
        let mut delta = Map::new();
        delta.insert(key.into(), value);
        Self {
            actions: Some(EventActions {
                state_delta: Some(delta),
            }),
            ..Default::default()
        }
    }

    /// Text fragments of this event in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
    }

    /// State delta entry for `key`, ignoring explicit nulls
    pub fn state_value(&self, key: &str) -> Option<&Value> {
        self.actions
            .as_ref()
            .and_then(|actions| actions.state_delta.as_ref())
            .and_then(|delta| delta.get(key))
            .filter(|value| !value.is_null())
    }

    /// Decode the body of a `/run` response.
    ///
    /// Non-array bodies yield no events; elements that do not look like an
    /// event are logged and replaced by an empty event so one odd entry never
    /// discards the rest of the response.
    pub fn from_response_body(body: Value) -> Vec<RawAgentEvent> {
        let Value::Array(items) = body else {
            warn!("agent response body is not an event array");
            return Vec::new();
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).unwrap_or_else(|error| {
                    warn!(index, %error, "skipping malformed agent event");
                    RawAgentEvent::default()
                })
            })
            .collect()
    }
}

/// Message sent to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub parts: Vec<EventPart>,
}

impl NewMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![EventPart {
                text: Some(text.into()),
            }],
        }
    }
}

/// Body of `POST /run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    pub new_message: NewMessage,
}

/// Response of the create-session endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCreated {
    pub id: String,
}

/// Application and user the conversation runs under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentity {
    pub app_name: String,
    pub user_id: String,
}
