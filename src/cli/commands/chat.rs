use anyhow::Result;
use std::sync::Arc;

use crate::assistant::AssistantClient;
use crate::chat::ChatSurface;
use crate::cli::EndpointArgs;

use super::load_resolved_config;

pub struct ChatOptions {
    pub to: Option<String>,
    pub endpoint: EndpointArgs,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_resolved_config(&options.endpoint, options.to)?;
    let client = AssistantClient::new(config.api_url.clone(), config.timeout)?;

    let mut surface = ChatSurface::new(config, Arc::new(client));
    surface.run().await
}
