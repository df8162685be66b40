use super::AppContext;
use super::render::{print_suggestions, print_turn};
use anyhow::Result;
use console::style;
use riskscope_core::ConversationTurn;
use riskscope_core::response::resolve_suggestions;
use std::io::{self, Write};
use tracing::info;

/// Handle the chat command
pub async fn handle_chat_command(context: &AppContext) -> Result<()> {
    println!("{}", style("Interactive chat").blue().bold());
    println!("Agent: {}", context.config.agent.base_url);
    if context.corpus_scoped {
        println!("Corpus: {}", context.corpus);
    }
    println!("Type '/reset' for a new session, '/quit' to exit");
    println!();

    let mut transcript: Vec<ConversationTurn> = Vec::new();
    let stdin = io::stdin();

    loop {
        print!("{} ", style("You:").blue().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                context.session.clear_session().await;
                transcript.clear();
                println!("{}", style("Started a new session").dim());
                continue;
            }
            _ => {}
        }

        transcript.push(ConversationTurn::user(input));
        let result = if context.corpus_scoped {
            context.session.ask_in_corpus(&context.corpus, input).await
        } else {
            context.session.send_message(input).await
        };

        println!();
        match result {
            Ok(response) => {
                let turn = ConversationTurn::from_response(&response);
                print_turn(&turn);
                print_suggestions(&resolve_suggestions(&response));
                transcript.push(turn);
            }
            Err(error) => {
                let turn = ConversationTurn::error(&error);
                print_turn(&turn);
                transcript.push(turn);
            }
        }
        println!();
    }

    info!(turns = transcript.len(), "chat ended");
    Ok(())
}
