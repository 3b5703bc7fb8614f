//! One turn of the conversation.

use crate::assistant::{ChatReply, Language, policy};

/// Maximum characters of a selection kept as a user message's context snippet.
pub const SNIPPET_MAX_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Display state of an assistant answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranslationState {
    #[default]
    Original,
    Translating,
    Translated,
    TranslateFailed,
}

impl TranslationState {
    /// States from which a translation request may start.
    pub const fn accepts_request(self) -> bool {
        matches!(self, Self::Original | Self::TranslateFailed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    original_content: Option<String>,
    sources: Vec<String>,
    grounded: bool,
    can_translate: bool,
    translation_state: TranslationState,
    translated_language: Option<Language>,
    context_snippet: Option<String>,
}

impl Message {
    /// A question typed by the reader, optionally about a captured selection.
    pub fn user(content: impl Into<String>, selection: Option<&str>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            original_content: None,
            sources: Vec::new(),
            grounded: false,
            can_translate: false,
            translation_state: TranslationState::Original,
            translated_language: None,
            context_snippet: selection.map(context_snippet),
        }
    }

    /// An answer received from the chat endpoint.
    pub fn answer(reply: ChatReply) -> Self {
        let can_translate = policy::is_translatable(&reply.response, reply.grounded);
        Self {
            role: Role::Assistant,
            original_content: Some(reply.response.clone()),
            content: reply.response,
            sources: reply.sources,
            grounded: reply.grounded,
            can_translate,
            translation_state: TranslationState::Original,
            translated_language: None,
            context_snippet: None,
        }
    }

    /// An assistant message produced locally rather than by the service.
    pub fn notice(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
            original_content: Some(content.to_string()),
            sources: Vec::new(),
            grounded: false,
            can_translate: false,
            translation_state: TranslationState::Original,
            translated_language: None,
            context_snippet: None,
        }
    }

    pub const fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn original_content(&self) -> Option<&str> {
        self.original_content.as_deref()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub const fn grounded(&self) -> bool {
        self.grounded
    }

    pub const fn can_translate(&self) -> bool {
        self.can_translate
    }

    pub const fn translation_state(&self) -> TranslationState {
        self.translation_state
    }

    pub const fn translated_language(&self) -> Option<Language> {
        self.translated_language
    }

    pub fn context_snippet(&self) -> Option<&str> {
        self.context_snippet.as_deref()
    }

    pub const fn is_assistant(&self) -> bool {
        matches!(self.role, Role::Assistant)
    }

    pub(crate) const fn set_translation_state(&mut self, state: TranslationState) {
        self.translation_state = state;
    }

    pub(crate) fn show_translation(&mut self, translated: String, language: Language) {
        self.content = translated;
        self.translation_state = TranslationState::Translated;
        self.translated_language = Some(language);
    }

    pub(crate) fn restore_original(&mut self) {
        if let Some(original) = &self.original_content {
            self.content.clone_from(original);
        }
        self.translation_state = TranslationState::Original;
        self.translated_language = None;
    }
}

/// Truncates a selection to a short preview, marking truncation with an ellipsis.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

fn context_snippet(selection: &str) -> String {
    truncate_preview(selection, SNIPPET_MAX_CHARS)
}
