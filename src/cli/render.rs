//! Plain terminal output for answers, citations and suggestions

use console::style;
use riskscope_core::response::{Citation, resolve_suggestions};
use riskscope_core::{ConversationTurn, NormalizedResponse};
use std::fmt::Display;

/// Print an agent answer: prose, numbered sources, then follow-ups
pub fn print_response(response: &NormalizedResponse) {
    let turn = ConversationTurn::from_response(response);
    print_turn(&turn);
    print_suggestions(&resolve_suggestions(response));
}

pub fn print_turn(turn: &ConversationTurn) {
    if turn.is_error {
        eprintln!("{}", style(&turn.content).red());
        return;
    }
    println!("{}", turn.content);
    print_citations(&turn.citations);
}

pub fn print_citations(citations: &[Citation]) {
    if citations.is_empty() {
        return;
    }
    println!();
    println!("{}", style("Sources:").bold());
    for (index, citation) in citations.iter().enumerate() {
        println!("  {}. {}", index + 1, style(&citation.source).cyan());
        if !citation.content.is_empty() {
            println!("     {}", style(&citation.content).dim());
        }
    }
}

pub fn print_suggestions(questions: &[String]) {
    if questions.is_empty() {
        return;
    }
    println!();
    println!("{}", style("You might also want to ask:").bold());
    for question in questions {
        println!("  - {question}");
    }
}

/// Render a failure as an error-flagged assistant turn
pub fn print_error(error: impl Display) {
    print_turn(&ConversationTurn::error(error));
}
