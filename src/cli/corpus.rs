//! Corpus management and compliance analysis commands

use super::AppContext;
use super::render::{print_error, print_response, print_suggestions};
use anyhow::Result;
use console::style;
use riskscope_core::{NormalizedResponse, TransportError};

pub async fn handle_corpora_command(context: &AppContext) -> Result<()> {
    finish(context.session.list_corpora().await)
}

pub async fn handle_corpus_info_command(context: &AppContext, name: Option<&str>) -> Result<()> {
    let corpus = name.unwrap_or(&context.corpus);
    println!("{}", style(format!("Corpus: {corpus}")).blue().bold());
    finish(context.session.corpus_info(corpus).await)
}

pub async fn handle_suggest_command(context: &AppContext, corpus: Option<&str>) -> Result<()> {
    let corpus = corpus.unwrap_or(&context.corpus);
    match context.session.corpus_suggestions(corpus).await {
        Ok(questions) if questions.is_empty() => {
            println!("No suggestions returned for {corpus}");
            Ok(())
        }
        Ok(questions) => {
            print_suggestions(&questions);
            Ok(())
        }
        Err(error) => {
            print_error(&error);
            Err(error.into())
        }
    }
}

/// Handle the analyze command
pub async fn handle_analyze_command(
    context: &AppContext,
    query: &[String],
    regulations: &[String],
) -> Result<()> {
    let query = query.join(" ");
    if !regulations.is_empty() {
        println!(
            "{}",
            style(format!("Checking against {}", regulations.join(", "))).dim()
        );
    }
    finish(context.session.analyze_risk(&query, regulations).await)
}

fn finish(result: Result<NormalizedResponse, TransportError>) -> Result<()> {
    match result {
        Ok(response) => {
            print_response(&response);
            Ok(())
        }
        Err(error) => {
            print_error(&error);
            Err(error.into())
        }
    }
}
