//! Command-line interface module
//!
//! Argument parsing, shared client setup and the command handlers.

pub mod args;
pub mod ask;
pub mod chat;
pub mod corpus;
pub mod files;
pub mod init;
pub mod render;

pub use args::{Cli, Commands};
pub use ask::handle_ask_command;
pub use chat::handle_chat_command;
pub use corpus::{
    handle_analyze_command, handle_corpora_command, handle_corpus_info_command,
    handle_suggest_command,
};
pub use files::{
    handle_delete_command, handle_documents_command, handle_search_command,
    handle_upload_command,
};
pub use init::handle_init_command;

use anyhow::{Context, Result};
use riskscope_core::config::RiskscopeConfig;
use riskscope_core::{AgentClient, FileSearchClient, SessionManager};
use std::sync::Arc;

/// Clients shared by the command handlers
pub struct AppContext {
    pub config: RiskscopeConfig,
    /// Corpus from `--corpus`, or the configured default
    pub corpus: String,
    /// Whether the user named the corpus explicitly
    pub corpus_scoped: bool,
    pub session: Arc<SessionManager<AgentClient>>,
}

impl AppContext {
    pub fn new(config: RiskscopeConfig, corpus: Option<String>) -> Result<Self> {
        let client = AgentClient::from_agent_config(&config.agent)
            .context("Failed to create agent client")?;
        let session = Arc::new(SessionManager::from_config(client, &config.agent));
        let corpus_scoped = corpus.is_some();
        let corpus = corpus.unwrap_or_else(|| config.agent.default_corpus.clone());

        Ok(Self {
            config,
            corpus,
            corpus_scoped,
            session,
        })
    }

    pub fn file_search(&self) -> Result<FileSearchClient> {
        FileSearchClient::from_config(&self.config.file_search)
            .context("Failed to create File Search client")
    }
}
