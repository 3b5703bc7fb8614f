//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so they never mix with answers on stdout. `RUST_LOG`
//! takes precedence over the verbosity flag.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive for a `-v` count.
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "docent_cli=warn",
        1 => "docent_cli=info",
        2 => "docent_cli=debug",
        _ => "docent_cli=trace",
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
