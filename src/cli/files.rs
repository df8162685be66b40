//! File Search commands and background uploads

use super::AppContext;
use super::render::print_citations;
use anyhow::{Context, Result};
use console::style;
use riskscope_core::uploads::{PendingUpload, UploadCoordinator, UploadNotification};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handle the upload command.
///
/// The upload runs as a background task; the command waits for its
/// completion notice before exiting.
pub async fn handle_upload_command(context: &AppContext, path: &Path) -> Result<()> {
    let upload = PendingUpload::from_path(path).await?;
    let store = Arc::new(context.file_search()?);
    let (sender, mut notifications) = mpsc::unbounded_channel::<UploadNotification>();
    let coordinator = UploadCoordinator::new(store, Arc::clone(&context.session), Arc::new(sender));

    let ticket = coordinator.start(upload, context.corpus.clone());
    println!("{}", ticket.acknowledgement);
    println!();

    let outcome = ticket.wait().await;
    if let Some(notification) = notifications.recv().await {
        let message = notification.message();
        if notification.success {
            println!("{}", style(message).green());
        } else {
            eprintln!("{}", style(message).red());
        }
    }
    outcome.map_err(Into::into)
}

pub async fn handle_search_command(context: &AppContext, query: &[String]) -> Result<()> {
    let query = query.join(" ");
    let result = context
        .file_search()?
        .search(&query)
        .await
        .context("File Search query failed")?;

    println!("{}", result.answer.trim());
    print_citations(&result.citations);
    Ok(())
}

pub async fn handle_documents_command(context: &AppContext) -> Result<()> {
    let list = context
        .file_search()?
        .list_documents()
        .await
        .context("Failed to list documents")?;

    if list.documents.is_empty() {
        println!("No documents in the File Search store");
        return Ok(());
    }

    println!(
        "{}",
        style(format!("{} document(s)", list.documents.len())).bold()
    );
    for document in &list.documents {
        println!(
            "  {} {} {}",
            style(document.label()).cyan(),
            style(format_size(document.size_bytes)).dim(),
            style(&document.state).dim()
        );
        println!("    {}", document.name);
    }
    Ok(())
}

pub async fn handle_delete_command(context: &AppContext, name: &str) -> Result<()> {
    let receipt = context
        .file_search()?
        .delete_document(name)
        .await
        .with_context(|| format!("Failed to delete {name}"))?;

    let message = if receipt.message.is_empty() {
        format!("Deleted {name}")
    } else {
        receipt.message
    };
    println!("{}", style(message).green());
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
