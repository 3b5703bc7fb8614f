//! Fixed texts exchanged with, or substituted for, the assistant service.

/// Returned by the chat endpoint when no supporting content was retrieved.
pub const REFUSAL_NO_CONTENT: &str = "The answer is not available in the selected content.";

/// Returned by the translate endpoint when it declines to translate.
pub const REFUSAL_NO_TRANSLATION: &str = "The requested content is not available for translation.";

/// Shown in place of an answer when the chat exchange fails for any reason.
pub const SERVICE_UNAVAILABLE: &str = "Sorry, I encountered an error. The backend service may be unavailable. Please try again later.";

/// Opening assistant message of every session.
pub const GREETING: &str = "Hello! I can help you understand concepts from this textbook. \
     Ask me anything, or select text from the book to ask about specific content.";

/// Whether an answer may be offered for translation.
///
/// Only grounded answers qualify, and a grounding refusal never does even
/// when the service flags it as grounded.
pub fn is_translatable(content: &str, grounded: bool) -> bool {
    grounded && content != REFUSAL_NO_CONTENT
}

/// Whether a translation reply is the policy refusal rather than a translation.
pub fn is_translation_refusal(translated: &str) -> bool {
    translated == REFUSAL_NO_TRANSLATION
}
