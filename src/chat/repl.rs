use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::sync::Arc;

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::assistant::{Backend, validate_language};
use crate::config::ResolvedConfig;
use crate::selection::{Anchor, Page, SelectionTracker};
use crate::session::{
    QueryDispatcher, Session, TranslationController, TranslationOutcome, TranslationState,
};
use crate::ui::{Spinner, Style, is_prompt_cancelled};

const DEFAULT_HELP: &str = "Ask a question, /select a passage first, /help for commands";

/// The interactive assistant surface.
///
/// Holds one conversation for as long as the REPL runs, together with the
/// page the reader highlights passages on.
pub struct ChatSurface<B> {
    config: ResolvedConfig,
    session: Session,
    page: Page,
    tracker: SelectionTracker,
    queries: QueryDispatcher<B>,
    translations: TranslationController<B>,
}

impl<B: Backend> ChatSurface<B> {
    pub fn new(config: ResolvedConfig, backend: Arc<B>) -> Self {
        let session = Session::new().with_language(config.language);
        let page = Page::new();
        let tracker = SelectionTracker::mount(&page);
        Self {
            config,
            session,
            page,
            tracker,
            queries: QueryDispatcher::new(Arc::clone(&backend)),
            translations: TranslationController::new(backend),
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(&self.config);
        ui::print_history(&self.session);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let help = self
                .session
                .pending_selection()
                .map_or_else(|| DEFAULT_HELP.to_string(), ui::selection_banner);

            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message(&help)
                .prompt();

            match input {
                Ok(line) => {
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
                Err(e) if is_prompt_cancelled(&e) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Handles one line of input. Returns `false` when the reader quits.
    pub async fn handle_line(&mut self, line: &str) -> bool {
        match parse_input(line) {
            Input::Empty => true,
            Input::Text(text) => {
                self.session.set_draft(text);
                self.ask().await;
                true
            }
            Input::Command(cmd) => self.handle_command(cmd).await,
        }
    }

    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Select(text) => self.select(text),
            SlashCommand::Clear => {
                SelectionTracker::clear(&mut self.session, &mut self.page);
                ui::print_success("Selection cleared");
            }
            SlashCommand::Lang(code) => self.set_language(code.as_deref()),
            SlashCommand::Translate(index) => self.translate(index).await,
            SlashCommand::Original(index) => self.show_original(index),
            SlashCommand::History => ui::print_history(&self.session),
            SlashCommand::Config => ui::print_config(&self.config, &self.session),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Usage(usage) => {
                ui::print_error(&format!("Usage: {usage}"));
            }
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    async fn ask(&mut self) {
        let Some(ticket) = self.session.submit_draft() else {
            return;
        };

        let spinner = Spinner::new("Thinking...");
        let outcome = self.queries.exchange(&ticket).await;
        spinner.stop();

        let index = self.queries.settle(&mut self.session, ticket, outcome);
        if let Some(message) = self.session.message(index) {
            ui::print_message(index, message);
        }
    }

    fn select(&mut self, text: String) {
        self.page.select(text, Anchor::doc_content());
        self.page.release_pointer();

        if self.tracker.poll(&mut self.session) {
            if let Some(selection) = self.session.pending_selection() {
                println!("{}", ui::selection_banner(selection));
                println!();
            }
        } else {
            ui::print_error("Selections must be longer than 10 and shorter than 2000 characters");
        }
    }

    fn set_language(&mut self, code: Option<&str>) {
        let Some(code) = code else {
            ui::print_language(self.session.preferred_language());
            return;
        };

        match validate_language(code) {
            Ok(language) => {
                self.session.change_language(language);
                ui::print_success(&format!(
                    "Preferred language set to {}",
                    Style::value(language.label())
                ));
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    async fn translate(&mut self, index: Option<usize>) {
        let target = self.session.preferred_language();
        if target.is_native() {
            ui::print_error("Choose a translation language first, e.g. /lang pashto");
            return;
        }

        let Some(index) = index.or_else(|| self.latest_translatable()) else {
            ui::print_error("No answer can be translated");
            return;
        };

        let Some(ticket) = self.translations.request(&mut self.session, index, target) else {
            ui::print_error(&format!("Message {index} cannot be translated"));
            return;
        };

        let spinner = Spinner::new(&format!("Translating to {}...", target.label()));
        let outcome = self.translations.exchange(&ticket).await;
        spinner.stop();

        // Refusals and failures leave the original text in place
        let settled = self.translations.settle(&mut self.session, ticket, outcome);
        if settled != TranslationOutcome::Translated {
            return;
        }
        if let Some(message) = self.session.message(index) {
            ui::print_message(index, message);
        }
    }

    fn show_original(&mut self, index: Option<usize>) {
        let Some(index) = index.or_else(|| self.latest_translated()) else {
            ui::print_error("No answer is showing a translation");
            return;
        };

        if self.translations.show_original(&mut self.session, index) {
            if let Some(message) = self.session.message(index) {
                ui::print_message(index, message);
            }
        } else {
            ui::print_error(&format!("Message {index} is not translated"));
        }
    }

    fn latest_translatable(&self) -> Option<usize> {
        self.session.messages().iter().rposition(|m| {
            m.is_assistant() && m.can_translate() && m.translation_state().accepts_request()
        })
    }

    fn latest_translated(&self) -> Option<usize> {
        self.session
            .messages()
            .iter()
            .rposition(|m| m.translation_state() == TranslationState::Translated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::assistant::{Language, TranslateReply};
    use crate::session::testing::{ScriptedBackend, grounded_reply};

    fn surface(backend: ScriptedBackend) -> (ChatSurface<ScriptedBackend>, Arc<ScriptedBackend>) {
        let backend = Arc::new(backend);
        let config = ResolvedConfig {
            environment: "development".to_string(),
            api_url: "http://localhost:8000/api".to_string(),
            language: Language::English,
            timeout: None,
        };
        (ChatSurface::new(config, Arc::clone(&backend)), backend)
    }

    fn translated(text: &str) -> TranslateReply {
        TranslateReply {
            translated: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_question_with_selection() {
        let (mut chat, backend) =
            surface(ScriptedBackend::new().with_chat(Ok(grounded_reply("PID loops correct error."))));

        assert!(chat.handle_line("/select A PID controller corrects error continuously.").await);
        assert!(chat.session().pending_selection().is_some());

        assert!(chat.handle_line("What does this do?").await);

        let requests = backend.chat_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "What does this do?");
        assert_eq!(
            requests[0].selected_text.as_deref(),
            Some("A PID controller corrects error continuously.")
        );
        assert!(chat.session().pending_selection().is_none());
        assert_eq!(chat.session().messages().len(), 3);
        assert!(!chat.session().is_busy());
    }

    #[tokio::test]
    async fn test_short_selection_not_captured() {
        let (mut chat, _) = surface(ScriptedBackend::new());
        chat.handle_line("/select too short").await;
        assert!(chat.session().pending_selection().is_none());
    }

    #[tokio::test]
    async fn test_clear_drops_selection() {
        let (mut chat, _) = surface(ScriptedBackend::new());
        chat.handle_line("/select Actuators turn signals into motion.").await;
        chat.handle_line("/clear").await;
        assert!(chat.session().pending_selection().is_none());
    }

    #[tokio::test]
    async fn test_lang_change_and_invalid_code() {
        let (mut chat, _) = surface(ScriptedBackend::new());

        chat.handle_line("/lang dari").await;
        assert_eq!(chat.session().preferred_language(), Language::Dari);

        chat.handle_line("/lang klingon").await;
        assert_eq!(chat.session().preferred_language(), Language::Dari);
    }

    #[tokio::test]
    async fn test_translate_latest_then_original() {
        let (mut chat, backend) = surface(
            ScriptedBackend::new()
                .with_chat(Ok(grounded_reply("Servo motors hold a commanded angle.")))
                .with_translation(Ok(translated("سروو موټورونه"))),
        );

        chat.handle_line("What is a servo?").await;
        chat.handle_line("/lang pashto").await;
        chat.handle_line("/translate").await;

        let answer = chat.session().message(2).unwrap();
        assert_eq!(answer.translation_state(), TranslationState::Translated);
        assert_eq!(answer.content(), "سروو موټورونه");
        assert_eq!(backend.translate_requests()[0].target_language, Language::Pashto);

        chat.handle_line("/original").await;
        let answer = chat.session().message(2).unwrap();
        assert_eq!(answer.translation_state(), TranslationState::Original);
        assert_eq!(answer.content(), "Servo motors hold a commanded angle.");
    }

    #[tokio::test]
    async fn test_translate_in_native_language_sends_nothing() {
        let (mut chat, backend) = surface(
            ScriptedBackend::new().with_chat(Ok(grounded_reply("Lidar measures distance."))),
        );

        chat.handle_line("What is lidar?").await;
        chat.handle_line("/translate 2").await;

        assert!(backend.translate_requests().is_empty());
        assert_eq!(
            chat.session().message(2).unwrap().translation_state(),
            TranslationState::Original
        );
    }

    #[tokio::test]
    async fn test_greeting_is_not_translatable() {
        let (mut chat, backend) = surface(ScriptedBackend::new());
        chat.handle_line("/lang pashto").await;
        chat.handle_line("/translate 0").await;
        assert!(backend.translate_requests().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_appends_notice() {
        let (mut chat, _) = surface(ScriptedBackend::new());
        chat.handle_line("Anyone there?").await;

        let last = chat.session().messages().last().unwrap();
        assert_eq!(last.content(), crate::assistant::policy::SERVICE_UNAVAILABLE);
        assert!(!last.can_translate());
        assert!(!chat.session().is_busy());
    }

    #[tokio::test]
    async fn test_quit_stops_loop() {
        let (mut chat, _) = surface(ScriptedBackend::new());
        assert!(chat.handle_line("").await);
        assert!(chat.handle_line("/help").await);
        assert!(!chat.handle_line("/quit").await);
    }
}
