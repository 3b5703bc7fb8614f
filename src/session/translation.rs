use std::sync::Arc;

use crate::assistant::{
    Backend, ExchangeError, Language, TranslateReply, TranslateRequest, policy,
};

use super::message::TranslationState;
use super::state::Session;

/// A translation accepted for one assistant message and awaiting its reply.
#[derive(Debug)]
#[must_use = "the session stays busy until this ticket is settled"]
pub struct TranslationTicket {
    index: usize,
    target: Language,
    content: String,
}

impl TranslationTicket {
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn target(&self) -> Language {
        self.target
    }

    fn to_request(&self) -> TranslateRequest {
        TranslateRequest {
            content: self.content.clone(),
            target_language: self.target,
        }
    }
}

/// How a settled translation left its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The message now shows the translation.
    Translated,
    /// The service declined; the message shows its original text.
    Refused,
    /// The exchange failed; the message shows its original text.
    Failed,
}

/// Drives the per-message translation state machine.
///
/// `Original`/`TranslateFailed` → `Translating` on request, then
/// `Translated`, back to `Original` on refusal, or `TranslateFailed` on
/// error. `Translated` → `Original` on show-original. Only one message can
/// be `Translating` because a request claims the session busy gate.
pub struct TranslationController<B> {
    backend: Arc<B>,
}

impl<B: Backend> TranslationController<B> {
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Starts translating message `index` into `target`.
    ///
    /// Returns `None` and changes nothing unless the message is a translatable
    /// assistant answer showing its original text, the target is not the
    /// native language, and no other exchange is outstanding.
    #[allow(clippy::unused_self)]
    pub fn request(
        &self,
        session: &mut Session,
        index: usize,
        target: Language,
    ) -> Option<TranslationTicket> {
        if target.is_native() {
            tracing::debug!(index, "translation to the native language ignored");
            return None;
        }

        let content = {
            let message = session.message(index)?;
            if !message.is_assistant()
                || !message.can_translate()
                || !message.translation_state().accepts_request()
            {
                tracing::debug!(
                    index,
                    state = ?message.translation_state(),
                    "message not eligible for translation"
                );
                return None;
            }
            message.original_content()?.to_string()
        };

        if !session.try_begin_exchange() {
            tracing::debug!(index, "translation ignored while an exchange is outstanding");
            return None;
        }
        if let Some(message) = session.message_mut(index) {
            message.set_translation_state(TranslationState::Translating);
        }

        Some(TranslationTicket {
            index,
            target,
            content,
        })
    }

    /// Performs the network exchange for an accepted translation.
    pub async fn exchange(
        &self,
        ticket: &TranslationTicket,
    ) -> Result<TranslateReply, ExchangeError> {
        self.backend.translate(&ticket.to_request()).await
    }

    /// Applies the translation outcome and releases the busy gate.
    ///
    /// Refusals and failures are not surfaced; they only leave the message
    /// showing its original text.
    #[allow(clippy::unused_self)]
    pub fn settle(
        &self,
        session: &mut Session,
        ticket: TranslationTicket,
        outcome: Result<TranslateReply, ExchangeError>,
    ) -> TranslationOutcome {
        let TranslationTicket { index, target, .. } = ticket;
        session.end_exchange();

        let Some(message) = session.message_mut(index) else {
            return TranslationOutcome::Failed;
        };

        match outcome {
            Ok(reply) if policy::is_translation_refusal(&reply.translated) => {
                tracing::info!(index, target = %target, "translation refused");
                message.set_translation_state(TranslationState::Original);
                TranslationOutcome::Refused
            }
            Ok(reply) => {
                message.show_translation(reply.translated, target);
                TranslationOutcome::Translated
            }
            Err(e) => {
                tracing::warn!(index, target = %target, error = %e, "translation failed");
                message.set_translation_state(TranslationState::TranslateFailed);
                TranslationOutcome::Failed
            }
        }
    }

    /// Requests, exchanges and settles in one step.
    ///
    /// Returns `None` if the request was not eligible.
    pub async fn translate(
        &self,
        session: &mut Session,
        index: usize,
        target: Language,
    ) -> Option<TranslationOutcome> {
        let ticket = self.request(session, index, target)?;
        let outcome = self.exchange(&ticket).await;
        Some(self.settle(session, ticket, outcome))
    }

    /// Switches a translated message back to its original text.
    ///
    /// Returns `false` if the message is not currently translated.
    #[allow(clippy::unused_self)]
    pub fn show_original(&self, session: &mut Session, index: usize) -> bool {
        match session.message_mut(index) {
            Some(message) if message.translation_state() == TranslationState::Translated => {
                message.restore_original();
                true
            }
            _ => false,
        }
    }
}
