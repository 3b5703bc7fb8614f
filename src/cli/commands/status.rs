//! Service health command handler.

use anyhow::{Context, Result};

use crate::assistant::AssistantClient;
use crate::cli::EndpointArgs;
use crate::ui::{Spinner, Style};

use super::load_resolved_config;

/// Queries the service health endpoint and prints the report.
pub async fn run_status(endpoint: &EndpointArgs) -> Result<()> {
    let config = load_resolved_config(endpoint, None)?;
    let client = AssistantClient::new(config.api_url.clone(), config.timeout)?;

    let spinner = Spinner::new("Checking service...");
    let report = client.health().await;
    spinner.stop();

    let report = report.with_context(|| {
        format!(
            "Assistant service in '{}' is unreachable",
            config.environment
        )
    })?;

    let healthy = report.status.eq_ignore_ascii_case("healthy")
        || report.status.eq_ignore_ascii_case("ok");
    let status = if healthy {
        Style::success(&report.status)
    } else {
        Style::warning(&report.status)
    };

    println!("{}", Style::header("Assistant service"));
    println!(
        "  {}  {}",
        Style::label("environment"),
        Style::value(&config.environment)
    );
    println!(
        "  {}      {}",
        Style::label("api_url"),
        Style::secondary(client.api_url())
    );
    println!("  {}       {status}", Style::label("status"));
    if let Some(service) = &report.service {
        println!("  {}      {}", Style::label("service"), Style::value(service));
    }
    if let Some(version) = &report.version {
        println!("  {}      {}", Style::label("version"), Style::value(version));
    }
    if let Some(timestamp) = &report.timestamp {
        println!("  {}    {}", Style::label("timestamp"), Style::secondary(timestamp));
    }

    Ok(())
}
