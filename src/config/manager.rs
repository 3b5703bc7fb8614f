use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::assistant::{Language, validate_language};
use crate::fs::atomic_write;
use crate::paths;

/// Environment variable selecting the deployment environment.
pub const ENV_VAR_ENVIRONMENT: &str = "DOCENT_ENV";

/// Environment variable overriding the API base URL outright.
pub const ENV_VAR_API_URL: &str = "DOCENT_API_URL";

/// Environment used when nothing else selects one.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// API base URL of the built-in `development` environment.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default settings in the `[docent]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocentConfig {
    /// Name of the `[environments.*]` entry to use.
    pub environment: Option<String>,
    /// Default preferred language code.
    pub language: Option<String>,
    /// Request timeout in seconds. Unset means no timeout beyond the transport's own.
    pub timeout_secs: Option<u64>,
}

/// Where the assistant service is deployed for one environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Base URL the `/chat`, `/translate` and `/health` paths are appended to.
    pub api_url: String,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/docent/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub docent: DocentConfig,
    /// Environments keyed by name.
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl ConfigFile {
    /// Configured environments plus the built-in `development` one when absent.
    pub fn environments_with_defaults(&self) -> BTreeMap<String, EnvironmentConfig> {
        let mut environments = self.environments.clone();
        environments
            .entry(DEFAULT_ENVIRONMENT.to_string())
            .or_insert_with(|| EnvironmentConfig {
                api_url: DEFAULT_API_URL.to_string(),
            });
        environments
    }
}

/// Resolved configuration after merging CLI options, environment and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub environment: String,
    pub api_url: String,
    pub language: Language,
    pub timeout: Option<Duration>,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over everything else.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub environment: Option<String>,
    pub api_url: Option<String>,
    pub to: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Variables read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub environment: Option<String>,
    pub api_url: Option<String>,
}

impl EnvOverrides {
    /// Reads `DOCENT_ENV` and `DOCENT_API_URL`, ignoring empty values.
    pub fn from_env() -> Self {
        Self {
            environment: non_empty_var(ENV_VAR_ENVIRONMENT),
            api_url: non_empty_var(ENV_VAR_API_URL),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolves configuration.
///
/// Priority (highest first): CLI options, environment variables, config
/// file, built-in defaults.
///
/// # Errors
///
/// Returns an error if the selected environment is unknown or the language
/// code is not supported.
pub fn resolve_config(
    options: &ResolveOptions,
    env: &EnvOverrides,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let environment = options
        .environment
        .as_ref()
        .or(env.environment.as_ref())
        .or(config_file.docent.environment.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

    let api_url = match options.api_url.as_ref().or(env.api_url.as_ref()) {
        Some(url) => url.clone(),
        None => {
            let environments = config_file.environments_with_defaults();
            let entry = environments.get(&environment).ok_or_else(|| {
                anyhow::anyhow!(
                    "Environment '{environment}' not found\n\n\
                     Available environments:\n  \
                     - {}\n\n\
                     Add environments to ~/.config/docent/config.toml",
                    environments
                        .keys()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join("\n  - ")
                )
            })?;
            entry.api_url.clone()
        }
    };

    let language = options
        .to
        .as_deref()
        .or(config_file.docent.language.as_deref())
        .map(validate_language)
        .transpose()?
        .unwrap_or_default();

    let timeout = options
        .timeout_secs
        .or(config_file.docent.timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(ResolvedConfig {
        environment,
        api_url,
        language,
        timeout,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/docent/config.toml`
    /// or `~/.config/docent/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, falling back to defaults when it is missing.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
