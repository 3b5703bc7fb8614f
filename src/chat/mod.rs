//! Interactive chat mode over the textbook assistant.
//!
//! Provides a REPL-style interface with slash commands for selecting
//! passages, switching languages and translating answers.

/// Slash command parsing and autocomplete.
pub mod command;
mod repl;
mod ui;

pub use repl::ChatSurface;
pub use ui::{BANNER_PREVIEW_CHARS, render_message, selection_banner};
