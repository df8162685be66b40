use super::AppContext;
use super::render::{print_error, print_response};
use anyhow::Result;
use tracing::debug;

/// Handle the ask command
pub async fn handle_ask_command(context: &AppContext, prompt: &[String]) -> Result<()> {
    let text = prompt.join(" ");
    debug!(chars = text.len(), scoped = context.corpus_scoped, "sending single prompt");

    let result = if context.corpus_scoped {
        context.session.ask_in_corpus(&context.corpus, &text).await
    } else {
        context.session.send_message(&text).await
    };

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
