//! riskscope configuration module
//!
//! Loads `riskscope.toml`, applies environment overrides and exposes the
//! endpoint settings for the agent server and the File Search service.

pub mod constants;
pub mod loader;

pub use loader::{ConfigManager, RiskscopeConfig};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Agent server settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Base URL of the agent server
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,

    /// Application name registered on the agent server
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User identifier sent with every request
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Upper bound on a single request, in seconds
    #[serde(default = "default_agent_request_timeout")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Corpus used when a command does not name one
    #[serde(default = "default_corpus")]
    pub default_corpus: String,

    /// Cap on suggested follow-up questions per chat answer
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: default_agent_base_url(),
            app_name: default_app_name(),
            user_id: default_user_id(),
            request_timeout_secs: default_agent_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            default_corpus: default_corpus(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl AgentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// File Search service settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileSearchConfig {
    #[serde(default = "default_file_search_base_url")]
    pub base_url: String,

    #[serde(default = "default_file_search_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_file_search_base_url(),
            request_timeout_secs: default_file_search_request_timeout(),
        }
    }
}

impl FileSearchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_agent_base_url() -> String {
    constants::agent::DEFAULT_BASE_URL.to_string()
}
fn default_app_name() -> String {
    constants::agent::DEFAULT_APP_NAME.to_string()
}
fn default_user_id() -> String {
    constants::agent::DEFAULT_USER_ID.to_string()
}
fn default_agent_request_timeout() -> u64 {
    constants::agent::DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_connect_timeout() -> u64 {
    constants::agent::DEFAULT_CONNECT_TIMEOUT_SECS
}
fn default_corpus() -> String {
    constants::agent::DEFAULT_CORPUS.to_string()
}
fn default_max_suggestions() -> usize {
    constants::suggestions::CHAT_MAX
}
fn default_file_search_base_url() -> String {
    constants::file_search::DEFAULT_BASE_URL.to_string()
}
fn default_file_search_request_timeout() -> u64 {
    constants::file_search::DEFAULT_REQUEST_TIMEOUT_SECS
}
