//! riskscope - terminal client for a document retrieval and compliance-analysis agent

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AppContext, Cli, Commands};
use riskscope_core::ConfigManager;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "riskscope=info,riskscope_core=info";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    init_tracing(args.log_level.as_deref());

    let workspace = match args.workspace {
        Some(workspace) => workspace,
        None => std::env::current_dir().context("cannot determine current dir")?,
    };

    let command = args.command.unwrap_or(Commands::Chat);
    if let Commands::Init { force } = command {
        return cli::handle_init_command(&workspace, force);
    }

    let mut config = ConfigManager::load_from_workspace(&workspace)
        .context("Failed to load configuration")?
        .into_config();
    if let Some(url) = args.api_url {
        config.agent.base_url = url;
    }
    let context = AppContext::new(config, args.corpus)?;

    match command {
        Commands::Chat => cli::handle_chat_command(&context).await,
        Commands::Ask { prompt } => cli::handle_ask_command(&context, &prompt).await,
        Commands::Corpora => cli::handle_corpora_command(&context).await,
        Commands::CorpusInfo { name } => {
            cli::handle_corpus_info_command(&context, name.as_deref()).await
        }
        Commands::Suggest { corpus } => {
            cli::handle_suggest_command(&context, corpus.as_deref()).await
        }
        Commands::Analyze { query, regulations } => {
            cli::handle_analyze_command(&context, &query, &regulations).await
        }
        Commands::Upload { path } => cli::handle_upload_command(&context, &path).await,
        Commands::Search { query } => cli::handle_search_command(&context, &query).await,
        Commands::Documents => cli::handle_documents_command(&context).await,
        Commands::Delete { name } => cli::handle_delete_command(&context, &name).await,
        Commands::Init { .. } => Ok(()),
    }
}

/// Log to stderr; `RUST_LOG` wins over `--log-level`
fn init_tracing(log_level: Option<&str>) {
    let fallback = log_level
        .map(|level| format!("riskscope={level},riskscope_core={level}"))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
