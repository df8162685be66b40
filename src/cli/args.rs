//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for riskscope
#[derive(Parser, Debug)]
#[command(
    name = "riskscope",
    version,
    about = "Terminal client for a document retrieval and compliance-analysis agent"
)]
pub struct Cli {
    /// Workspace root directory; defaults to current directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Agent server base URL, overrides riskscope.toml and RISKSCOPE_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Corpus to scope questions to and to upload into
    #[arg(long, global = true)]
    pub corpus: Option<String>,

    /// Log filter used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive chat; `/reset` starts a new session, `/quit` exits
    Chat,

    /// Send a single message and print the answer
    Ask {
        /// The message to send
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// List the corpora known to the agent
    Corpora,

    /// Describe a corpus (defaults to the configured corpus)
    CorpusInfo { name: Option<String> },

    /// Suggest questions grounded in a corpus
    Suggest { corpus: Option<String> },

    /// Analyze text for regulatory compliance
    Analyze {
        #[arg(required = true)]
        query: Vec<String>,

        /// Regulation to check against; repeatable
        #[arg(long = "regulation", short = 'r')]
        regulations: Vec<String>,
    },

    /// Upload a document and add it to a corpus in the background
    Upload { path: PathBuf },

    /// Semantic search over the File Search store
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List documents in the File Search store
    Documents,

    /// Delete a document from the File Search store by resource name
    Delete { name: String },

    /// Write a default riskscope.toml into the workspace
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_collects_regulations() {
        let cli = Cli::try_parse_from([
            "riskscope",
            "analyze",
            "vendor",
            "contract",
            "--regulation",
            "GDPR",
            "-r",
            "SOX",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Analyze {
                query: vec!["vendor".into(), "contract".into()],
                regulations: vec!["GDPR".into(), "SOX".into()],
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "riskscope",
            "upload",
            "policy.pdf",
            "--corpus",
            "regulations",
            "--api-url",
            "http://agent:8000",
        ])
        .unwrap();

        assert_eq!(cli.corpus.as_deref(), Some("regulations"));
        assert_eq!(cli.api_url.as_deref(), Some("http://agent:8000"));
        assert_eq!(
            cli.command,
            Some(Commands::Upload {
                path: PathBuf::from("policy.pdf")
            })
        );
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["riskscope"]).unwrap();
        assert!(cli.command.is_none());
    }
}
