//! Webhook commands.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use console::Style;

use agentfactory_client::{CreateWebhookRequest, ListOptions};

use super::Context;

/// Arguments for the webhooks command.
#[derive(Args, Debug)]
pub struct WebhooksArgs {
    #[command(subcommand)]
    pub command: WebhooksCommand,
}

#[derive(Subcommand, Debug)]
pub enum WebhooksCommand {
    /// Register a webhook
    Create {
        /// Name
        #[arg(long)]
        name: String,

        /// Delivery URL
        #[arg(long)]
        url: String,

        /// Event to subscribe to (repeatable)
        #[arg(short, long = "event", required = true)]
        events: Vec<String>,

        /// Shared secret for signing deliveries
        #[arg(long, env = "AGENTFACTORY_WEBHOOK_SECRET", hide_env_values = true)]
        secret: Option<String>,
    },

    /// List webhooks
    List {
        /// Maximum webhooks to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete a webhook
    Delete {
        /// Webhook ID
        id: String,
    },
}

/// Run the webhooks command.
pub async fn run(args: WebhooksArgs, ctx: &Context) -> Result<()> {
    let webhooks = ctx.client.webhooks();

    match args.command {
        WebhooksCommand::Create {
            name,
            url,
            events,
            secret,
        } => {
            let request = CreateWebhookRequest {
                name,
                url,
                events,
                secret,
            };
            let webhook = webhooks
                .create(request)
                .await
                .context("error creating webhook")?;
            if ctx.json_output {
                ctx.print_json(&webhook)?;
            } else {
                println!("Webhook created: {}", webhook.id);
            }
        }
        WebhooksCommand::List { limit } => {
            let listed = webhooks
                .list(limit.map(ListOptions::limit))
                .await
                .context("error listing webhooks")?;
            if ctx.json_output {
                ctx.print_json(&listed)?;
            } else {
                let dim = Style::new().dim();
                println!("Found {} webhooks:", listed.len());
                for hook in &listed {
                    println!(
                        "- {} ({}) {} {}",
                        hook.name,
                        hook.id,
                        hook.url,
                        dim.apply_to(hook.events.join(", "))
                    );
                }
            }
        }
        WebhooksCommand::Delete { id } => {
            webhooks.delete(&id).await.context("error deleting webhook")?;
            if !ctx.json_output {
                println!("Deleted webhook {}", id);
            }
        }
    }

    Ok(())
}
