pub mod config;

pub use config::ClientConfig;

use crate::agent::errors::TransportError;
use crate::agent::models::{AgentIdentity, RawAgentEvent, RunRequest, SessionCreated};
use crate::agent::transport::AgentTransport;
use crate::config::AgentConfig;
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{debug, info, warn};

/// HTTP client for the agent server
#[derive(Clone)]
pub struct AgentClient {
    base_url: String,
    http: ReqwestClient,
    config: ClientConfig,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(
        base_url: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, TransportError> {
        let http = build_http_client(&config)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            config,
        })
    }

    /// Client for the endpoint described by the `[agent]` section
    pub fn from_agent_config(config: &AgentConfig) -> Result<Self, TransportError> {
        Self::with_config(&config.base_url, ClientConfig::from_agent_config(config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get current client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL with `segments` appended, each one percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            TransportError::Network(format!("Invalid agent URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::Network(format!("Agent URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.config.request_timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            warn!(%url, status = status.as_u16(), %message, "agent request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.config.request_timeout))
    }
}

#[async_trait]
impl AgentTransport for AgentClient {
    async fn create_session(&self, identity: &AgentIdentity) -> Result<String, TransportError> {
        let url = self.endpoint(&[
            "apps",
            &identity.app_name,
            "users",
            &identity.user_id,
            "sessions",
        ])?;
        debug!(app = %identity.app_name, "creating agent session");
        let created: SessionCreated = self.post_json(url, &json!({})).await?;
        info!(session_id = %created.id, "agent session created");
        Ok(created.id)
    }

    async fn run(&self, request: &RunRequest) -> Result<Vec<RawAgentEvent>, TransportError> {
        let start_time = Instant::now();
        debug!(session_id = %request.session_id, "sending message to agent");

        let body: Value = self.post_json(self.endpoint(&["run"])?, request).await?;
        let events = RawAgentEvent::from_response_body(body);

        debug!(
            events = events.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "agent run completed"
        );
        Ok(events)
    }
}

pub(crate) fn build_http_client(config: &ClientConfig) -> Result<ReqwestClient, TransportError> {
    ReqwestClient::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| TransportError::Network(format!("Failed to build HTTP client: {e}")))
}

/// Pull a human readable message out of an error body.
///
/// JSON bodies are searched for `message`, `error` and `detail` in that
/// order; any other non-empty body is returned as is.
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error", "detail"] {
            match map.get(key) {
                Some(Value::String(text)) if !text.is_empty() => return Some(text.clone()),
                Some(value) if !value.is_null() => return Some(value.to_string()),
                _ => {}
            }
        }
    }

    Some(trimmed.to_string())
}
