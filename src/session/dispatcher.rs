use std::sync::Arc;

use crate::assistant::{Backend, ChatReply, ExchangeError, policy};

use super::message::Message;
use super::state::{QueryTicket, Session};

/// Runs question-answering exchanges and folds their outcome into a session.
pub struct QueryDispatcher<B> {
    backend: Arc<B>,
}

impl<B: Backend> QueryDispatcher<B> {
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Performs the network exchange for an accepted question.
    ///
    /// Does not touch the session, so other events can be handled while the
    /// answer is outstanding.
    pub async fn exchange(&self, ticket: &QueryTicket) -> Result<ChatReply, ExchangeError> {
        self.backend.chat(&ticket.to_request()).await
    }

    /// Appends the answer (or the service-unavailable notice) and releases
    /// the busy gate. Returns the index of the appended message.
    #[allow(clippy::unused_self)]
    pub fn settle(
        &self,
        session: &mut Session,
        ticket: QueryTicket,
        outcome: Result<ChatReply, ExchangeError>,
    ) -> usize {
        let message = match outcome {
            Ok(reply) => {
                tracing::info!(
                    grounded = reply.grounded,
                    sources = reply.sources.len(),
                    scoped = ticket.selection().is_some(),
                    "answer received"
                );
                Message::answer(reply)
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat exchange failed");
                Message::notice(policy::SERVICE_UNAVAILABLE)
            }
        };

        session.push(message);
        session.end_exchange();
        session.messages().len() - 1
    }

    /// Runs the exchange for `ticket` and settles it.
    pub async fn dispatch(&self, session: &mut Session, ticket: QueryTicket) -> usize {
        let outcome = self.exchange(&ticket).await;
        self.settle(session, ticket, outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::assistant::policy::{REFUSAL_NO_CONTENT, SERVICE_UNAVAILABLE};
    use crate::session::testing::{ScriptedBackend, grounded_reply, transport_error};

    fn dispatcher(backend: ScriptedBackend) -> QueryDispatcher<ScriptedBackend> {
        QueryDispatcher::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn test_grounded_answer_is_translatable() {
        let dispatcher = dispatcher(ScriptedBackend::new().with_chat(Ok(grounded_reply(
            "A digital twin is a virtual model of a physical system.",
        ))));
        let mut session = Session::new();

        let ticket = session.submit_question("What is a digital twin?").unwrap();
        let index = dispatcher.dispatch(&mut session, ticket).await;

        let answer = session.message(index).unwrap();
        assert!(answer.is_assistant());
        assert!(answer.grounded());
        assert!(answer.can_translate());
        assert_eq!(answer.sources(), ["module-3".to_string()]);
        assert!(!session.is_busy());
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_refusal_sentinel_blocks_translation() {
        let dispatcher =
            dispatcher(ScriptedBackend::new().with_chat(Ok(grounded_reply(REFUSAL_NO_CONTENT))));
        let mut session = Session::new();

        let ticket = session.submit_question("What is the airspeed of a swallow?").unwrap();
        let index = dispatcher.dispatch(&mut session, ticket).await;

        let answer = session.message(index).unwrap();
        assert!(answer.grounded());
        assert!(!answer.can_translate());
    }

    #[tokio::test]
    async fn test_network_failure_appends_single_notice() {
        let dispatcher = dispatcher(ScriptedBackend::new().with_chat(Err(transport_error())));
        let mut session = Session::new();

        let ticket = session.submit_question("Hello?").unwrap();
        let before = session.messages().len();
        dispatcher.dispatch(&mut session, ticket).await;

        assert_eq!(session.messages().len(), before + 1);
        let notice = session.messages().last().unwrap();
        assert!(notice.is_assistant());
        assert_eq!(notice.content(), SERVICE_UNAVAILABLE);
        assert!(!notice.can_translate());
        assert!(notice.sources().is_empty());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_status_failure_keeps_session_usable() {
        let dispatcher = dispatcher(
            ScriptedBackend::new()
                .with_chat(Err(ExchangeError::Status {
                    url: "http://localhost/api/chat".to_string(),
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                }))
                .with_chat(Ok(grounded_reply("Second time lucky."))),
        );
        let mut session = Session::new();

        let ticket = session.submit_question("first").unwrap();
        dispatcher.dispatch(&mut session, ticket).await;
        let ticket = session.submit_question("second").unwrap();
        let index = dispatcher.dispatch(&mut session, ticket).await;

        assert_eq!(session.message(index).unwrap().content(), "Second time lucky.");
    }

    #[tokio::test]
    async fn test_selection_forwarded_to_backend() {
        let backend = Arc::new(ScriptedBackend::new().with_chat(Ok(grounded_reply("Yes."))));
        let dispatcher = QueryDispatcher::new(Arc::clone(&backend));
        let mut session = Session::new();
        session.capture_selection("Inverse kinematics solves for joint angles.".to_string());

        let ticket = session.submit_question("Is this hard?").unwrap();
        dispatcher.dispatch(&mut session, ticket).await;

        let requests = backend.chat_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "Is this hard?");
        assert_eq!(
            requests[0].selected_text.as_deref(),
            Some("Inverse kinematics solves for joint angles.")
        );
    }

    #[tokio::test]
    async fn test_session_stays_busy_until_settled() {
        let dispatcher = dispatcher(ScriptedBackend::new().with_chat(Ok(grounded_reply("Done."))));
        let mut session = Session::new();

        let ticket = session.submit_question("one").unwrap();
        let outcome = dispatcher.exchange(&ticket).await;
        assert!(session.is_busy());
        assert!(session.submit_question("two").is_none());

        dispatcher.settle(&mut session, ticket, outcome);
        assert!(!session.is_busy());
    }
}
