/// Agent server defaults
pub mod agent {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_APP_NAME: &str = "risk_assessment_agent";
    pub const DEFAULT_USER_ID: &str = "user";
    /// Compliance analysis runs can take several minutes end to end
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_CORPUS: &str = "data_v1";
    pub const USER_AGENT: &str = concat!("riskscope/", env!("CARGO_PKG_VERSION"));
}

/// File Search service defaults
pub mod file_search {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
}

/// Suggested follow-up question caps used by the different call sites
pub mod suggestions {
    /// Chat turns
    pub const CHAT_MAX: usize = 6;
    /// Corpus overview prompts ask the agent for eight questions
    pub const CORPUS_OVERVIEW_MAX: usize = 8;
    /// Inline "you might also ask" lists
    pub const INLINE_MAX: usize = 4;
    /// Lines shorter than this are not treated as questions
    pub const MIN_QUESTION_CHARS: usize = 10;
}

/// Environment variable overrides applied after loading `riskscope.toml`
pub mod env {
    pub const API_URL: &str = "RISKSCOPE_API_URL";
    pub const FILE_SEARCH_URL: &str = "RISKSCOPE_FILE_SEARCH_URL";
    pub const DEFAULT_CORPUS: &str = "RISKSCOPE_DEFAULT_CORPUS";
}

/// Configuration file locations
pub mod paths {
    pub const CONFIG_FILE_NAME: &str = "riskscope.toml";
    pub const CONFIG_DIR_NAME: &str = ".riskscope";
}

/// Fixed strings surfaced to users
pub mod messages {
    pub const NO_RESPONSE: &str = "No response received from agent.";
    pub const ERROR_PREFIX: &str = "❌ Error: ";
}
