//! Conversation session management
//!
//! [`SessionManager`] owns the opaque session id for one conversation. The id
//! is created lazily on the first message and dropped when the server reports
//! the session as missing or conflicting. Failed calls are never retried.

pub mod turn;

pub use turn::{ConversationTurn, Role};

use crate::agent::models::{AgentIdentity, NewMessage, RunRequest};
use crate::agent::prompts;
use crate::agent::{AgentTransport, TransportError};
use crate::config::AgentConfig;
use crate::config::constants::suggestions::CORPUS_OVERVIEW_MAX;
use crate::response::{NormalizedResponse, extract_listed_questions, normalize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct SessionManager<T> {
    transport: T,
    identity: AgentIdentity,
    max_suggestions: usize,
    /// Held across session creation so concurrent first messages share one id
    session_id: Mutex<Option<String>>,
}

impl<T: AgentTransport> SessionManager<T> {
    pub fn new(transport: T, identity: AgentIdentity, max_suggestions: usize) -> Self {
        Self {
            transport,
            identity,
            max_suggestions,
            session_id: Mutex::new(None),
        }
    }

    pub fn from_config(transport: T, config: &AgentConfig) -> Self {
        Self::new(
            transport,
            AgentIdentity {
                app_name: config.app_name.clone(),
                user_id: config.user_id.clone(),
            },
            config.max_suggestions,
        )
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    /// Currently held session id, if any
    pub async fn session_id(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }

    /// Forget the session; the next message creates a new one
    pub async fn clear_session(&self) {
        if let Some(previous) = self.session_id.lock().await.take() {
            info!(session_id = %previous, "session cleared");
        }
    }

    /// Send one message using the configured suggestion cap
    pub async fn send_message(&self, text: &str) -> Result<NormalizedResponse, TransportError> {
        self.send_message_with_cap(text, self.max_suggestions).await
    }

    /// Send one message, keeping at most `max_suggestions` follow-ups
    pub async fn send_message_with_cap(
        &self,
        text: &str,
        max_suggestions: usize,
    ) -> Result<NormalizedResponse, TransportError> {
        let session_id = self.ensure_session().await?;
        let request = RunRequest {
            app_name: self.identity.app_name.clone(),
            user_id: self.identity.user_id.clone(),
            session_id: session_id.clone(),
            new_message: NewMessage::user_text(text),
        };

        match self.transport.run(&request).await {
            Ok(events) => Ok(normalize(&events, max_suggestions)),
            Err(error) => {
                if error.is_session_invalid() {
                    self.invalidate(&session_id).await;
                }
                Err(error)
            }
        }
    }

    pub async fn list_corpora(&self) -> Result<NormalizedResponse, TransportError> {
        self.send_message(&prompts::list_corpora()).await
    }

    pub async fn add_document<S: AsRef<str> + Sync>(
        &self,
        corpus: &str,
        paths: &[S],
    ) -> Result<NormalizedResponse, TransportError> {
        self.send_message(&prompts::add_document(corpus, paths)).await
    }

    pub async fn corpus_info(&self, corpus: &str) -> Result<NormalizedResponse, TransportError> {
        self.send_message(&prompts::corpus_info(corpus)).await
    }

    pub async fn analyze_risk<S: AsRef<str> + Sync>(
        &self,
        query: &str,
        regulations: &[S],
    ) -> Result<NormalizedResponse, TransportError> {
        self.send_message(&prompts::analyze_risk(query, regulations))
            .await
    }

    /// Ask a question restricted to one corpus
    pub async fn ask_in_corpus(
        &self,
        corpus: &str,
        text: &str,
    ) -> Result<NormalizedResponse, TransportError> {
        self.send_message(&prompts::corpus_scoped(corpus, text))
            .await
    }

    /// Follow-up questions grounded in one corpus.
    ///
    /// Falls back to reading the answer as a plain list when the agent does
    /// not return structured suggestions.
    pub async fn corpus_suggestions(&self, corpus: &str) -> Result<Vec<String>, TransportError> {
        let cap = CORPUS_OVERVIEW_MAX;
        let response = self
            .send_message_with_cap(&prompts::corpus_questions(corpus, cap), cap)
            .await?;

        if response.has_suggestions() {
            Ok(response.suggested_questions)
        } else {
            Ok(extract_listed_questions(&response.content, cap))
        }
    }

    async fn ensure_session(&self) -> Result<String, TransportError> {
        let mut guard = self.session_id.lock().await;
        if let Some(id) = guard.as_ref() {
            return Ok(id.clone());
        }

        debug!(app = %self.identity.app_name, "no session held, creating one");
        let id = self.transport.create_session(&self.identity).await?;
        *guard = Some(id.clone());
        Ok(id)
    }

    /// Drop `failed` unless another call already replaced it
    async fn invalidate(&self, failed: &str) {
        let mut guard = self.session_id.lock().await;
        if guard.as_deref() == Some(failed) {
            *guard = None;
            warn!(session_id = %failed, "session rejected by server, cleared");
        }
    }
}
