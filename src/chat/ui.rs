//! Chat mode UI components.

use super::command::SLASH_COMMANDS;
use crate::assistant::SessionState;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(state: &SessionState) {
    println!(
        "{} {} - Interactive Language Assistant",
        Style::header("langassist"),
        Style::secondary(format!("v{VERSION}"))
    );
    println!(
        "{}",
        Style::secondary(format!(
            "{} → {}",
            state.source_language.name, state.target_language.name
        ))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(state: &SessionState, transport: &str) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}       {} {}",
        Style::label("from"),
        Style::value(state.source_language.name),
        Style::code(state.source_language.code)
    );
    println!(
        "  {}         {} {}",
        Style::label("to"),
        Style::value(state.target_language.name),
        Style::code(state.target_language.code)
    );
    println!(
        "  {}  {}",
        Style::label("transport"),
        Style::secondary(transport)
    );
    if !state.result_text.is_empty() {
        println!(
            "  {}     {}",
            Style::label("answer"),
            Style::secondary(format!("{} chars", state.result_text.chars().count()))
        );
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (command, description) in SLASH_COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<8}")),
            Style::secondary(description)
        );
    }
    println!();
    println!(
        "{}",
        Style::hint("Any other line is sent as the topic. Ctrl+C stops a running answer.")
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
