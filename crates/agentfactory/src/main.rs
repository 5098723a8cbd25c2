//! Agent Factory command-line client.
//!
//! Main entry point for the `agentfactory` CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{agents, chat, errors, kb, tour, webhooks};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Agent Factory - command-line client for the Agent Factory platform
#[derive(Parser)]
#[command(name = "agentfactory")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Service URL (default: http://localhost:8000)
    #[arg(long, global = true, env = "AGENTFACTORY_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory holding config.toml (default: platform config dir)
    #[arg(long, global = true, env = "AGENTFACTORY_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Also write JSON logs to a daily rotating file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage agents
    Agents(agents::AgentsArgs),

    /// Send a message to an agent
    Chat(chat::ChatArgs),

    /// Manage knowledge bases and their documents
    Kb(kb::KbArgs),

    /// Manage webhooks
    Webhooks(webhooks::WebhooksArgs),

    /// Fetch an agent and classify any error
    Errors(errors::ErrorsArgs),

    /// Run the guided walkthrough of every API
    Tour(tour::TourArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "agentfactory=debug,agentfactory_client=debug,agentfactory_config=debug,info"
    } else {
        "agentfactory=info,agentfactory_client=info,agentfactory_config=info,warn"
    };
    let _guard = init_tracing(filter, cli.log_dir.as_deref());

    let ctx = commands::Context::load(
        cli.base_url.as_deref(),
        cli.config_dir.as_deref(),
        cli.json,
        cli.verbose,
    )?;

    // Dispatch to command handlers
    match cli.command {
        Commands::Agents(args) => agents::run(args, &ctx).await,
        Commands::Chat(args) => chat::run(args, &ctx).await,
        Commands::Kb(args) => kb::run(args, &ctx).await,
        Commands::Webhooks(args) => webhooks::run(args, &ctx).await,
        Commands::Errors(args) => errors::run(args, &ctx).await,
        Commands::Tour(args) => tour::run(args, &ctx).await,
    }
}

/// Console logging to stderr, plus an optional JSON file layer.
///
/// `RUST_LOG` replaces the console filter when set.
fn init_tracing(
    default_filter: &str,
    log_dir: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "agentfactory.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new(
                    "agentfactory=trace,agentfactory_client=trace,agentfactory_config=trace,info",
                ));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();

    guard
}
