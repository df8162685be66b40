//! Transport seam between the session manager and the agent server
//!
//! `AgentClient` is the HTTP implementation. Tests and alternate data
//! sources (for example canned demo responses) implement the same trait.

use crate::agent::errors::TransportError;
use crate::agent::models::{AgentIdentity, RawAgentEvent, RunRequest};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Create a session and return its identifier
    async fn create_session(&self, identity: &AgentIdentity) -> Result<String, TransportError>;

    /// Run one user message and return the raw events it produced
    async fn run(&self, request: &RunRequest) -> Result<Vec<RawAgentEvent>, TransportError>;
}

#[async_trait]
impl<T: AgentTransport + ?Sized> AgentTransport for Arc<T> {
    async fn create_session(&self, identity: &AgentIdentity) -> Result<String, TransportError> {
        (**self).create_session(identity).await
    }

    async fn run(&self, request: &RunRequest) -> Result<Vec<RawAgentEvent>, TransportError> {
        (**self).run(request).await
    }
}
