//! Environment listing command handler.

use anyhow::{Result, bail};

use crate::config::{ConfigFile, ConfigManager, DEFAULT_ENVIRONMENT};
use crate::ui::Style;

/// Prints known environments to stdout.
///
/// If `name` is provided, shows the details of that environment only. The
/// built-in `development` environment is always listed.
pub fn print_environments(name: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    print_environments_from(&config, name)
}

fn print_environments_from(config: &ConfigFile, name: Option<&str>) -> Result<()> {
    let environments = config.environments_with_defaults();
    let default_environment = config
        .docent
        .environment
        .as_deref()
        .unwrap_or(DEFAULT_ENVIRONMENT);

    let marker = |env: &str| {
        if env == default_environment {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    };

    if let Some(name) = name {
        let Some(environment) = environments.get(name) else {
            bail!(
                "Environment '{name}' not found\n\n\
                 Run 'docent environments' to list them."
            );
        };
        println!("Environment: {}{}", Style::value(name), marker(name));
        println!(
            "  {} = {}",
            Style::label("api_url"),
            Style::secondary(&environment.api_url)
        );
        if !config.environments.contains_key(name) {
            println!("  {}", Style::hint("built in"));
        }
        return Ok(());
    }

    println!("{}", Style::header("Environments"));
    for (env_name, environment) in &environments {
        println!("  {}{}", Style::value(env_name), marker(env_name));
        println!(
            "    {} {}",
            Style::label("api_url:"),
            Style::secondary(&environment.api_url)
        );
    }
    println!();
    println!(
        "{}",
        Style::hint("Add environments under [environments.NAME] in ~/.config/docent/config.toml")
    );

    Ok(())
}
