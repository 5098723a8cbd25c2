//! CLI command handlers.

pub mod agents;
pub mod chat;
pub mod errors;
pub mod kb;
pub mod tour;
pub mod webhooks;

use std::path::Path;

use anyhow::{Context as _, Result};
use console::Style;
use serde::Serialize;

use agentfactory_client::{Backoff, Client, RetryPolicy};
use agentfactory_config::{AgentFactoryConfig, RetryStrategy};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configured API client.
    pub client: Client,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build the context from config files, environment and flags.
    pub fn load(
        base_url: Option<&str>,
        config_dir: Option<&Path>,
        json_output: bool,
        verbose: bool,
    ) -> Result<Self> {
        let loaded = agentfactory_config::load_config_with_options(None, config_dir);
        let config = loaded.config;

        let api_key = agentfactory_config::resolve_api_key(&config);
        tracing::debug!(source = %api_key.source, "Resolved API key");

        let client = Client::builder()
            .base_url(base_url.unwrap_or_else(|| config.base_url()))
            .api_key(api_key.value)
            .timeout(config.timeout())
            .retry_policy(retry_policy(&config))
            .build()
            .context("failed to build API client")?;

        Ok(Self {
            client,
            json_output,
            verbose,
        })
    }

    /// Print a value as pretty JSON.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Map the `[retry]` section onto a client retry policy.
pub fn retry_policy(config: &AgentFactoryConfig) -> RetryPolicy {
    let retry = &config.retry;
    let backoff = match retry.strategy() {
        RetryStrategy::Flat => Backoff::Flat {
            default_wait: retry.default_wait(),
        },
        RetryStrategy::Exponential => Backoff::Exponential {
            initial: retry.default_wait(),
            multiplier: 2.0,
            max: retry.max_wait(),
        },
    };
    let backoff = if retry.jitter() > 0.0 {
        backoff.jittered(retry.jitter())
    } else {
        backoff
    };

    RetryPolicy {
        max_attempts: retry.max_attempts(),
        backoff,
    }
}

/// Print an error line to stderr.
pub fn print_error(err: &dyn std::fmt::Display) {
    let red = Style::new().red();
    eprintln!("{} {}", red.apply_to("Error:"), err);
}

/// Shorten text to one line of at most `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_len {
        s
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
