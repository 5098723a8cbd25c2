//! Configuration types.
//!
//! Every field is optional so that layers can be merged; accessors apply
//! the defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Default service URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts for rate-limited calls.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait between rate-limited attempts, in seconds.
pub const DEFAULT_WAIT_SECS: u64 = 60;

/// Default upper bound for exponential waits, in seconds.
pub const DEFAULT_MAX_WAIT_SECS: u64 = 300;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentFactoryConfig {
    /// Service URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API key. Prefer the `AGENTFACTORY_API_KEY` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Rate-limit retry settings.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Backoff strategy name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryStrategy {
    #[default]
    Flat,
    Exponential,
}

/// `[retry]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts including the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    /// Wait when the service gives no hint (flat), or the initial wait (exponential).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_wait_secs: Option<u64>,
    /// Strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<RetryStrategy>,
    /// Cap for exponential waits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wait_secs: Option<u64>,
    /// Jitter ratio in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter: Option<f64>,
}

impl AgentFactoryConfig {
    /// Parse a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: AgentFactoryConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        self.retry.merge(other.retry);
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base_url
            && url.trim().is_empty()
        {
            return Err(invalid("base_url", "must not be empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs", "must be at least 1"));
        }
        self.retry.validate()
    }

    /// Service URL, or the default.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Request timeout, or the default.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Whether the file layer carried a plaintext key.
    pub fn has_plaintext_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl RetryConfig {
    fn merge(&mut self, other: RetryConfig) {
        if other.max_attempts.is_some() {
            self.max_attempts = other.max_attempts;
        }
        if other.default_wait_secs.is_some() {
            self.default_wait_secs = other.default_wait_secs;
        }
        if other.strategy.is_some() {
            self.strategy = other.strategy;
        }
        if other.max_wait_secs.is_some() {
            self.max_wait_secs = other.max_wait_secs;
        }
        if other.jitter.is_some() {
            self.jitter = other.jitter;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_attempts == Some(0) {
            return Err(invalid("retry.max_attempts", "must be at least 1"));
        }
        if let Some(jitter) = self.jitter
            && !(0.0..=1.0).contains(&jitter)
        {
            return Err(invalid("retry.jitter", "must be between 0.0 and 1.0"));
        }
        Ok(())
    }

    /// Attempts, or the default.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Default wait, or the default.
    pub fn default_wait(&self) -> Duration {
        Duration::from_secs(self.default_wait_secs.unwrap_or(DEFAULT_WAIT_SECS))
    }

    /// Strategy, or flat.
    pub fn strategy(&self) -> RetryStrategy {
        self.strategy.unwrap_or_default()
    }

    /// Exponential cap, or the default.
    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs.unwrap_or(DEFAULT_MAX_WAIT_SECS))
    }

    /// Jitter ratio, or none.
    pub fn jitter(&self) -> f64 {
        self.jitter.unwrap_or(0.0)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AgentFactoryConfig::from_toml("").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts(), 3);
        assert_eq!(config.retry.default_wait(), Duration::from_secs(60));
        assert_eq!(config.retry.strategy(), RetryStrategy::Flat);
        assert_eq!(config.retry.jitter(), 0.0);
    }

    #[test]
    fn test_parse_full_config() {
        let config = AgentFactoryConfig::from_toml(
            r#"
base_url = "https://factory.example.com"
timeout_secs = 10

[retry]
max_attempts = 5
default_wait_secs = 2
strategy = "exponential"
max_wait_secs = 30
jitter = 0.25
"#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "https://factory.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts(), 5);
        assert_eq!(config.retry.strategy(), RetryStrategy::Exponential);
        assert_eq!(config.retry.max_wait(), Duration::from_secs(30));
        assert_eq!(config.retry.jitter(), 0.25);
        assert!(!config.has_plaintext_api_key());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(AgentFactoryConfig::from_toml("base_uri = \"x\"").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(matches!(
            AgentFactoryConfig::from_toml("[retry]\nmax_attempts = 0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            AgentFactoryConfig::from_toml("[retry]\njitter = 1.5"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            AgentFactoryConfig::from_toml("timeout_secs = 0"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_merge_field_by_field() {
        let mut base = AgentFactoryConfig::from_toml(
            "base_url = \"https://a.example.com\"\n\
             [retry]\nmax_attempts = 4\ndefault_wait_secs = 5",
        )
        .unwrap();
        let overlay = AgentFactoryConfig::from_toml("[retry]\nmax_attempts = 2").unwrap();

        base.merge(overlay);

        assert_eq!(base.base_url(), "https://a.example.com");
        assert_eq!(base.retry.max_attempts(), 2);
        assert_eq!(base.retry.default_wait(), Duration::from_secs(5));
    }
}
