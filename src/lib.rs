//! # docent - Textbook Assistant CLI
//!
//! `docent` puts the reading assistant of an online robotics textbook in the
//! terminal. Readers ask questions, optionally about a passage they have
//! highlighted, and can have grounded answers translated into Pashto or Dari.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive chat
//! docent
//!
//! # Ask about a passage
//! docent ask "What does this mean?" --selection "A PID controller corrects error."
//!
//! # Answer, then translate it
//! docent ask "What is odometry?" --to dari
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/docent/config.toml`:
//!
//! ```toml
//! [docent]
//! environment = "production"
//! language = "pashto"
//! timeout_secs = 30
//!
//! [environments.production]
//! api_url = "https://docs.example.org/api"
//! ```

/// Assistant service client, wire types and answer policy.
pub mod assistant;

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and endpoint resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Reading passages from files and stdin.
pub mod input;

/// Tracing subscriber setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Capturing highlighted passages.
pub mod selection;

/// Conversation state and the query and translation flows.
pub mod session;

/// Terminal UI components (spinner, colors).
pub mod ui;
