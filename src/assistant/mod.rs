//! Client side of the question-answering and translation service.

mod client;
mod error;
mod language;
pub mod policy;

pub use client::{
    AssistantClient, Backend, ChatReply, ChatRequest, HealthReport, TranslateReply,
    TranslateRequest,
};
pub use error::ExchangeError;
pub use language::{Language, print_languages, validate_language};
