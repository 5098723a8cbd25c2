//! Errors command - look up an agent and report how the call failed.

use anyhow::Result;
use clap::Args;
use console::Style;

use agentfactory_client::{Error, ErrorKind};

use super::{Context, print_error};

/// Arguments for the errors command.
#[derive(Args, Debug)]
pub struct ErrorsArgs {
    /// Agent ID to look up
    #[arg(default_value = "invalid_agent_id")]
    pub agent_id: String,
}

/// Run the errors command.
///
/// A failed lookup is the expected outcome, so it is reported rather than
/// returned.
pub async fn run(args: ErrorsArgs, ctx: &Context) -> Result<()> {
    match ctx.client.agents().get(&args.agent_id).await {
        Ok(agent) => {
            if ctx.json_output {
                ctx.print_json(&agent)?;
            } else {
                let green = Style::new().green();
                println!("{} Agent exists: {}", green.apply_to("✓"), agent.id);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, kind = %e.kind(), "Lookup failed");
            if ctx.json_output {
                ctx.print_json(&serde_json::json!({
                    "kind": e.kind().to_string(),
                    "status": e.status(),
                    "message": describe(&e),
                }))?;
            } else {
                print_error(&describe(&e));
            }
        }
    }

    Ok(())
}

/// One-line description of an error, by kind.
pub(crate) fn describe(err: &Error) -> String {
    match err.kind() {
        ErrorKind::NotFound => "Agent not found".to_string(),
        ErrorKind::Authentication => "Authentication failed".to_string(),
        ErrorKind::RateLimited => match err.retry_after() {
            Some(wait) => format!("Rate limit exceeded (retry after {}s)", wait.as_secs()),
            None => "Rate limit exceeded".to_string(),
        },
        ErrorKind::Api(status) => match err.root() {
            Error::Api { message, .. } => format!("API Error: {} (Status: {})", message, status),
            other => format!("API Error: {} (Status: {})", other, status),
        },
        ErrorKind::Transport
        | ErrorKind::Decode
        | ErrorKind::InvalidArgument
        | ErrorKind::Config
        | ErrorKind::RetriesExhausted => format!("Unexpected error: {}", err),
    }
}
