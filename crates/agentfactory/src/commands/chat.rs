//! Chat command - send one message to an agent.

use anyhow::{Context as _, Result};
use clap::Args;
use console::Style;

use super::Context;

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Agent ID
    pub agent_id: String,

    /// Message to send
    pub message: String,

    /// Continue an existing conversation instead of starting a new one
    #[arg(short, long)]
    pub conversation: Option<String>,

    /// Print the full conversation history after the reply
    #[arg(long)]
    pub history: bool,
}

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let agent = ctx
        .client
        .agents()
        .get(&args.agent_id)
        .await
        .context("error getting agent")?;
    let conversations = ctx.client.agents().conversations(&agent.id);

    let conversation_id = match args.conversation {
        Some(id) => id,
        None => {
            conversations
                .create()
                .await
                .context("error creating conversation")?
                .id
        }
    };
    if ctx.verbose {
        let dim = Style::new().dim();
        println!("{}", dim.apply_to(format!("Conversation: {}", conversation_id)));
    }

    let reply = conversations
        .send_message(&conversation_id, &args.message)
        .await
        .context("error sending message")?;

    if ctx.json_output {
        ctx.print_json(&reply)?;
    } else {
        println!("Agent response: {}", reply.text);
    }

    if args.history {
        let messages = conversations
            .messages(&conversation_id)
            .await
            .context("error fetching history")?;
        if ctx.json_output {
            ctx.print_json(&messages)?;
        } else {
            let dim = Style::new().dim();
            for message in &messages {
                println!(
                    "{} {}",
                    dim.apply_to(format!("[{:?}]", message.role).to_lowercase()),
                    message.text
                );
            }
        }
    }

    Ok(())
}
