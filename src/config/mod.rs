//! Configuration file management and endpoint resolution.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_API_URL, DEFAULT_ENVIRONMENT, DocentConfig,
    ENV_VAR_API_URL, ENV_VAR_ENVIRONMENT, EnvOverrides, EnvironmentConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
