//! # riskscope-core
//!
//! Client-side core for a document retrieval and compliance-analysis agent.
//!
//! The agent answers every `/run` call with an array of loosely structured
//! events. This crate turns those events into a display-ready answer with
//! follow-up suggestions and source citations, and wraps the surrounding
//! plumbing: session handling, the File Search document store and background
//! uploads.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use riskscope_core::{AgentClient, ConfigManager, SessionManager};
//! use riskscope_core::response::{extract_citations, resolve_suggestions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigManager::load()?.into_config();
//!     let client = AgentClient::from_agent_config(&config.agent)?;
//!     let session = SessionManager::from_config(client, &config.agent);
//!
//!     let response = session.send_message("What does our retention policy say?").await?;
//!     println!("{}", response.content);
//!     for citation in extract_citations(&response.content) {
//!         println!("- {}: {}", citation.source, citation.content);
//!     }
//!     for question in resolve_suggestions(&response) {
//!         println!("? {question}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod config;
pub mod file_search;
pub mod response;
pub mod session;
pub mod uploads;

pub use agent::{AgentClient, AgentTransport, RawAgentEvent, TransportError};
pub use config::{ConfigManager, RiskscopeConfig};
pub use file_search::{FileSearchClient, FileSearchError};
pub use response::{Citation, NormalizedResponse};
pub use session::{ConversationTurn, SessionManager};
pub use uploads::{
    NotificationSink, PendingUpload, UploadCoordinator, UploadError, UploadNotification,
    UploadTicket,
};
