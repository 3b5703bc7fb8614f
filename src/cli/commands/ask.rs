//! One-shot question command handler.

use anyhow::{Result, bail};
use std::sync::Arc;

use crate::assistant::AssistantClient;
use crate::cli::EndpointArgs;
use crate::input::InputReader;
use crate::selection::{Anchor, MAX_SELECTION_CHARS, MIN_SELECTION_CHARS, Page, SelectionTracker};
use crate::session::{
    Message, QueryDispatcher, Session, TranslationController, TranslationOutcome,
};
use crate::status;
use crate::ui::{Spinner, Style};

use super::load_resolved_config;

pub struct AskOptions {
    pub question: String,
    pub selection: Option<String>,
    pub selection_file: Option<String>,
    pub to: Option<String>,
    pub endpoint: EndpointArgs,
}

pub async fn run_ask(options: AskOptions) -> Result<()> {
    let config = load_resolved_config(&options.endpoint, options.to)?;
    let backend = Arc::new(AssistantClient::new(config.api_url.clone(), config.timeout)?);
    let queries = QueryDispatcher::new(Arc::clone(&backend));
    let translations = TranslationController::new(backend);

    let mut session = Session::new().with_language(config.language);

    let passage = match (options.selection, options.selection_file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(InputReader::read(&path)?),
        (None, None) => None,
    };
    if let Some(passage) = passage {
        capture_passage(&mut session, passage)?;
    }

    let Some(ticket) = session.submit_question(&options.question) else {
        bail!("Question cannot be empty");
    };

    let spinner = Spinner::new("Thinking...");
    let outcome = queries.exchange(&ticket).await;
    spinner.stop();

    let failed = outcome.is_err();
    let index = queries.settle(&mut session, ticket, outcome);
    let Some(answer) = session.message(index) else {
        bail!("Answer missing from the conversation");
    };
    print_answer(answer);
    let can_translate = answer.can_translate();

    if failed {
        bail!(
            "The assistant service at {} did not answer.\n\n\
             Run 'docent status' to check it.",
            config.api_url
        );
    }

    let target = session.preferred_language();
    if target.is_native() {
        return Ok(());
    }

    if !can_translate {
        status!(
            "{}",
            Style::hint("This answer is not available for translation.")
        );
        return Ok(());
    }

    let spinner = Spinner::new(&format!("Translating to {}...", target.label()));
    let translated = translations.translate(&mut session, index, target).await;
    spinner.stop();

    match translated {
        Some(TranslationOutcome::Translated) => {
            if let Some(message) = session.message(index) {
                println!();
                println!("{}", Style::header(format!("[{}]", target.label())));
                println!("{}", message.content());
            }
        }
        Some(TranslationOutcome::Refused | TranslationOutcome::Failed) | None => {
            status!(
                "{}",
                Style::warning(format!("Translation to {} is unavailable.", target.label()))
            );
        }
    }

    Ok(())
}

/// Runs the passage through the same capture rules as a highlighted selection.
fn capture_passage(session: &mut Session, passage: String) -> Result<()> {
    let mut page = Page::new();
    let mut tracker = SelectionTracker::mount(&page);

    page.select(passage, Anchor::doc_content());
    page.release_pointer();

    if !tracker.poll(session) {
        bail!(
            "Selected passage must be longer than {MIN_SELECTION_CHARS} and shorter than \
             {MAX_SELECTION_CHARS} characters after trimming"
        );
    }
    Ok(())
}

fn print_answer(answer: &Message) {
    println!("{}", answer.content());
    if !answer.sources().is_empty() {
        println!();
        println!(
            "{} {}",
            Style::label("Sources:"),
            Style::secondary(answer.sources().join(", "))
        );
    }
}
