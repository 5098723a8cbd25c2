//! Configuration for the Agent Factory SDK and CLI.
//!
//! Provides TOML-based configuration with:
//! - Service URL and request timeout
//! - A `[retry]` section for rate-limit backoff
//! - Config file layering (user config + project-local overrides)
//! - API key resolution (env var → config file → placeholder)

pub mod discovery;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{
    CONFIG_DIR_ENV, ConfigSource, LoadedConfig, load_config, load_config_file,
    load_config_with_options, user_config_dir, user_config_path,
};
pub use error::{ConfigError, Result};
pub use secrets::{
    API_KEY_ENV, ApiKeySource, PLACEHOLDER_API_KEY, ResolvedApiKey, resolve_api_key,
    resolve_api_key_from,
};
pub use types::*;
