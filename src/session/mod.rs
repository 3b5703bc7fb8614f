//! Assistant session: conversation log, busy gate, query and translation flows.
//!
//! A [`Session`] is pure state. Network exchanges are split into three steps
//! so the session is never borrowed across an await:
//!
//! 1. a synchronous request (`Session::submit_question`,
//!    `TranslationController::request`) validates the action, mutates state
//!    and returns a ticket holding the busy gate;
//! 2. `exchange` performs the HTTP call using only the ticket;
//! 3. `settle` consumes the ticket, folds the outcome into the session and
//!    releases the gate.

mod dispatcher;
mod message;
mod state;
mod translation;

pub use dispatcher::QueryDispatcher;
pub use message::{Message, Role, SNIPPET_MAX_CHARS, TranslationState, truncate_preview};
pub use state::{QueryTicket, Session};
pub use translation::{TranslationController, TranslationOutcome, TranslationTicket};
