//! Configure command handler for editing default settings.

use anyhow::Result;
use inquire::{CustomType, Select};

use crate::assistant::Language;
use crate::config::{ConfigFile, ConfigManager};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command to edit default settings.
///
/// Lets the user pick the default environment, answer language and
/// request timeout.
pub fn run_configure() -> Result<()> {
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let environment = select_environment(&config)?;
    let language = select_language(config.docent.language.as_deref())?;
    let timeout_secs = prompt_timeout(config.docent.timeout_secs)?;

    config.docent.environment = Some(environment);
    config.docent.language = Some(language.code().to_string());
    config.docent.timeout_secs = timeout_secs;

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn not_set() -> String {
    Style::secondary("(not set)")
}

fn print_current_defaults(config: &ConfigFile) {
    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}  {}",
        Style::label("environment"),
        config
            .docent
            .environment
            .as_deref()
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("language"),
        config
            .docent
            .language
            .as_deref()
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}      {}",
        Style::label("timeout"),
        config
            .docent
            .timeout_secs
            .map_or_else(not_set, |secs| Style::value(format!("{secs}s")))
    );
    println!();
}

fn select_environment(config: &ConfigFile) -> Result<String> {
    let names: Vec<String> = config.environments_with_defaults().into_keys().collect();

    let default_index = config
        .docent
        .environment
        .as_deref()
        .and_then(|d| names.iter().position(|n| n == d))
        .unwrap_or(0);

    let selection = Select::new("Default environment:", names)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_language(default: Option<&str>) -> Result<Language> {
    let default_index = default
        .and_then(|d| Language::ALL.iter().position(|l| l.code() == d))
        .unwrap_or(0);

    let selection = Select::new("Preferred answer language:", Language::ALL.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn prompt_timeout(default: Option<u64>) -> Result<Option<u64>> {
    let secs = CustomType::<u64>::new("Request timeout in seconds:")
        .with_default(default.unwrap_or(0))
        .with_help_message("0 waits as long as the service takes")
        .with_error_message("Enter a whole number of seconds")
        .prompt()?;

    Ok((secs > 0).then_some(secs))
}
