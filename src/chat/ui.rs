//! Chat mode UI components.

use std::fmt::Write as _;

use crate::assistant::Language;
use crate::config::ResolvedConfig;
use crate::session::{Message, Role, Session, TranslationState, truncate_preview};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Characters of the pending selection shown in the banner.
pub const BANNER_PREVIEW_CHARS: usize = 50;

pub fn print_header(config: &ResolvedConfig) {
    println!(
        "{} {} - Textbook Assistant",
        Style::header("docent"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "{}",
        Style::secondary(format!("{} ({})", config.environment, config.api_url))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

/// Renders one message with its log position.
pub fn render_message(index: usize, message: &Message) -> String {
    let mut out = String::new();

    let speaker = match message.role() {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    let _ = writeln!(out, "{} {}", Style::secondary(format!("[{index}]")), Style::speaker(speaker));

    if let Some(snippet) = message.context_snippet() {
        let _ = writeln!(out, "  {} {}", Style::label("Regarding:"), Style::quote(snippet));
    }

    for line in message.content().lines() {
        let _ = writeln!(out, "  {line}");
    }

    if !message.sources().is_empty() {
        let _ = writeln!(
            out,
            "  {} {}",
            Style::label("Sources:"),
            Style::secondary(message.sources().join(", "))
        );
    }

    match message.translation_state() {
        TranslationState::Translating => {
            let _ = writeln!(out, "  {}", Style::hint("Translating..."));
        }
        TranslationState::Translated => {
            if let Some(language) = message.translated_language() {
                let _ = writeln!(
                    out,
                    "  {} {}",
                    Style::success(format!("Translated to {}", language.label())),
                    Style::hint(format!("(/original {index})"))
                );
            }
        }
        TranslationState::Original | TranslationState::TranslateFailed => {}
    }

    out
}

pub fn print_message(index: usize, message: &Message) {
    println!("{}", render_message(index, message));
}

pub fn print_history(session: &Session) {
    for (index, message) in session.messages().iter().enumerate() {
        print_message(index, message);
    }
}

/// One-line preview of the passage the next question will be about.
pub fn selection_banner(selection: &str) -> String {
    format!(
        "{} \"{}\"",
        Style::label("Selected:"),
        Style::quote(truncate_preview(selection, BANNER_PREVIEW_CHARS))
    )
}

pub fn print_config(config: &ResolvedConfig, session: &Session) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}  {}",
        Style::label("environment"),
        Style::value(&config.environment)
    );
    println!(
        "  {}      {}",
        Style::label("api_url"),
        Style::secondary(&config.api_url)
    );
    println!(
        "  {}     {}",
        Style::label("language"),
        Style::value(session.preferred_language().code())
    );
    if let Some(timeout) = config.timeout {
        println!(
            "  {}      {}",
            Style::label("timeout"),
            Style::value(format!("{}s", timeout.as_secs()))
        );
    }
    println!();
}

pub fn print_language(current: Language) {
    println!(
        "Preferred language: {} {}",
        Style::value(current.code()),
        Style::secondary(format!("({})", current.label()))
    );
    let choices: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
    println!(
        "{}",
        Style::hint(format!("Change it with /lang <{}>", choices.join("|")))
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let rows = [
        ("/select <passage>", "Highlight a passage; the next question is about it"),
        ("/clear", "Clear the selected passage"),
        ("/lang [code]", "Show or change the preferred language"),
        ("/translate [n]", "Translate answer n (default: latest translatable)"),
        ("/original [n]", "Show the original text of answer n"),
        ("/history", "Show the conversation"),
        ("/config", "Show current configuration"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat mode"),
    ];
    for (command, description) in rows {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<18}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
