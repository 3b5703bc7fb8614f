//! Subcommand implementations.

use anyhow::Result;

use crate::config::{ConfigManager, EnvOverrides, ResolveOptions, ResolvedConfig, resolve_config};

use super::EndpointArgs;

/// One-shot question command handler.
pub mod ask;

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Environment listing command handler.
pub mod environments;

/// Service health command handler.
pub mod status;

/// Merges CLI options with the environment and the config file.
pub(crate) fn load_resolved_config(
    endpoint: &EndpointArgs,
    to: Option<String>,
) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;

    let options = ResolveOptions {
        environment: endpoint.env.clone(),
        api_url: endpoint.api_url.clone(),
        to,
        timeout_secs: endpoint.timeout,
    };

    let resolved = resolve_config(&options, &EnvOverrides::from_env(), &file_config)?;
    tracing::debug!(
        environment = %resolved.environment,
        api_url = %resolved.api_url,
        language = %resolved.language,
        "configuration resolved"
    );
    Ok(resolved)
}
