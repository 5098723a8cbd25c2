//! API key resolution.
//!
//! Resolution order:
//! 1. `AGENTFACTORY_API_KEY` environment variable
//! 2. Config file (with warning at load time)
//! 3. Placeholder key, which the service will reject

use crate::AgentFactoryConfig;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "AGENTFACTORY_API_KEY";

/// Key used when nothing else is configured.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key";

/// Result of API key resolution with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApiKey {
    /// The key.
    pub value: String,
    /// Where it came from.
    pub source: ApiKeySource,
}

/// Where an API key was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Environment variable.
    EnvVar,
    /// Config file (plaintext).
    ConfigFile,
    /// Nothing configured.
    Placeholder,
}

impl std::fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiKeySource::EnvVar => write!(f, "env var {}", API_KEY_ENV),
            ApiKeySource::ConfigFile => write!(f, "config file (plaintext)"),
            ApiKeySource::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// Resolve the API key from the environment and config.
pub fn resolve_api_key(config: &AgentFactoryConfig) -> ResolvedApiKey {
    resolve_api_key_from(std::env::var(API_KEY_ENV).ok(), config)
}

/// Resolve the API key given an explicit environment value.
pub fn resolve_api_key_from(
    env_value: Option<String>,
    config: &AgentFactoryConfig,
) -> ResolvedApiKey {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return ResolvedApiKey {
            value,
            source: ApiKeySource::EnvVar,
        };
    }

    if let Some(value) = config.api_key.as_ref().filter(|v| !v.trim().is_empty()) {
        return ResolvedApiKey {
            value: value.clone(),
            source: ApiKeySource::ConfigFile,
        };
    }

    tracing::warn!(
        env_var = API_KEY_ENV,
        "No API key configured, using placeholder; requests will fail authentication"
    );
    ResolvedApiKey {
        value: PLACEHOLDER_API_KEY.to_string(),
        source: ApiKeySource::Placeholder,
    }
}
