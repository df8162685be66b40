//! Agent server integration: wire models, transport seam and HTTP client

pub mod client;
pub mod errors;
pub mod models;
pub mod prompts;
pub mod transport;

pub use client::{AgentClient, ClientConfig};
pub use errors::TransportError;
pub use models::{AgentIdentity, EventActions, EventContent, EventPart, RawAgentEvent, RunRequest};
pub use transport::AgentTransport;
