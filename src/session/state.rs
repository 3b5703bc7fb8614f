use crate::assistant::{ChatRequest, Language, policy};

use super::message::Message;

/// A question accepted by the session and awaiting its answer.
///
/// Holding a ticket means the session is busy; the busy gate is released
/// only when the ticket is handed back to [`QueryDispatcher::settle`].
///
/// [`QueryDispatcher::settle`]: super::QueryDispatcher::settle
#[derive(Debug)]
#[must_use = "the session stays busy until this ticket is settled"]
pub struct QueryTicket {
    question: String,
    selection: Option<String>,
}

impl QueryTicket {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub(crate) fn to_request(&self) -> ChatRequest {
        ChatRequest {
            query: self.question.clone(),
            selected_text: self.selection.clone(),
        }
    }
}

/// Conversation log and ambient assistant state for one page visit.
///
/// All mutations go through the methods here or through the dispatcher and
/// translation controller, which hold the only crate-level mutation hooks.
#[derive(Debug)]
pub struct Session {
    messages: Vec<Message>,
    draft_input: String,
    pending_selection: Option<String>,
    preferred_language: Language,
    busy: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session opened by the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::notice(policy::GREETING)],
            draft_input: String::new(),
            pending_selection: None,
            preferred_language: Language::default(),
            busy: false,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.preferred_language = language;
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    pub fn pending_selection(&self) -> Option<&str> {
        self.pending_selection.as_deref()
    }

    pub const fn preferred_language(&self) -> Language {
        self.preferred_language
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_input = text.into();
    }

    /// Submits the current draft. See [`Session::submit_question`].
    pub fn submit_draft(&mut self) -> Option<QueryTicket> {
        let draft = self.draft_input.clone();
        self.submit_question(&draft)
    }

    /// Records a question and hands back the exchange to run for it.
    ///
    /// Returns `None` without touching any state when the text is blank or
    /// another exchange is outstanding. On acceptance the pending selection
    /// is detached into the ticket, the draft is cleared and the session
    /// becomes busy.
    pub fn submit_question(&mut self, text: &str) -> Option<QueryTicket> {
        let question = text.trim();
        if question.is_empty() {
            tracing::debug!("ignoring blank question");
            return None;
        }
        if self.busy {
            tracing::debug!("ignoring question while an exchange is outstanding");
            return None;
        }

        let selection = self.pending_selection.take();
        self.messages
            .push(Message::user(question, selection.as_deref()));
        self.draft_input.clear();
        self.busy = true;

        Some(QueryTicket {
            question: question.to_string(),
            selection,
        })
    }

    /// Sets the language later translation requests target.
    ///
    /// Existing messages keep whatever they currently display.
    pub const fn change_language(&mut self, language: Language) {
        self.preferred_language = language;
    }

    pub fn clear_selection(&mut self) {
        self.pending_selection = None;
    }

    pub(crate) fn capture_selection(&mut self, text: String) {
        self.pending_selection = Some(text);
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn message_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }

    /// Claims the busy gate. Returns `false` if it was already held.
    pub(crate) const fn try_begin_exchange(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub(crate) const fn end_exchange(&mut self) {
        self.busy = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn test_new_session_starts_with_greeting() {
        let session = Session::new();
        assert_eq!(session.messages().len(), 1);
        let greeting = &session.messages()[0];
        assert!(greeting.is_assistant());
        assert!(!greeting.can_translate());
        assert!(!session.is_busy());
        assert_eq!(session.preferred_language(), Language::English);
    }

    #[test]
    fn test_submit_appends_user_message_and_sets_busy() {
        let mut session = Session::new();
        session.set_draft("What is a digital twin?");

        let ticket = session.submit_draft().unwrap();

        assert_eq!(ticket.question(), "What is a digital twin?");
        assert!(ticket.selection().is_none());
        assert!(session.is_busy());
        assert_eq!(session.draft_input(), "");
        let last = session.messages().last().unwrap();
        assert_eq!(last.role(), Role::User);
        assert_eq!(last.content(), "What is a digital twin?");
    }

    #[test]
    fn test_submit_trims_question() {
        let mut session = Session::new();
        let ticket = session.submit_question("  Why?  \n").unwrap();
        assert_eq!(ticket.question(), "Why?");
        assert_eq!(session.messages().last().unwrap().content(), "Why?");
    }

    #[test]
    fn test_blank_submission_is_noop() {
        let mut session = Session::new();
        session.set_draft("   ");

        assert!(session.submit_draft().is_none());
        assert!(session.submit_question("").is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_busy());
        assert_eq!(session.draft_input(), "   ");
    }

    #[test]
    fn test_submission_rejected_while_busy() {
        let mut session = Session::new();
        let _first = session.submit_question("first").unwrap();
        session.capture_selection("a passage that stays pending".to_string());
        session.set_draft("second");

        assert!(session.submit_draft().is_none());
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.draft_input(), "second");
        assert_eq!(
            session.pending_selection(),
            Some("a passage that stays pending")
        );
    }

    #[test]
    fn test_selection_consumed_by_one_submission() {
        let mut session = Session::new();
        session.capture_selection("Actuators convert energy into motion.".to_string());

        let ticket = session.submit_question("Explain this").unwrap();
        assert_eq!(
            ticket.selection(),
            Some("Actuators convert energy into motion.")
        );
        assert!(session.pending_selection().is_none());
        assert_eq!(
            session.messages().last().unwrap().context_snippet(),
            Some("Actuators convert energy into motion.")
        );

        session.end_exchange();
        let next = session.submit_question("And then?").unwrap();
        assert!(next.selection().is_none());
    }

    #[test]
    fn test_ticket_request_carries_selection() {
        let mut session = Session::new();
        session.capture_selection("Lidar measures distance with light.".to_string());
        let ticket = session.submit_question("How?").unwrap();

        let request = ticket.to_request();
        assert_eq!(request.query, "How?");
        assert_eq!(
            request.selected_text.as_deref(),
            Some("Lidar measures distance with light.")
        );
    }

    #[test]
    fn test_change_language_is_plain_assignment() {
        let mut session = Session::new();
        session.change_language(Language::Pashto);
        assert_eq!(session.preferred_language(), Language::Pashto);
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_busy_gate_claimed_once() {
        let mut session = Session::new();
        assert!(session.try_begin_exchange());
        assert!(!session.try_begin_exchange());
        session.end_exchange();
        assert!(session.try_begin_exchange());
    }
}
