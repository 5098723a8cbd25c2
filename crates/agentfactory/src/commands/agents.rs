//! Agent management commands.
//!
//! - `agentfactory agents create` - Create an agent from a blueprint
//! - `agentfactory agents get <id>` - Show one agent
//! - `agentfactory agents list` - List agents
//! - `agentfactory agents delete <id>` - Delete an agent

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use console::{Style, style};

use agentfactory_client::{Agent, CreateAgentRequest, ListOptions};

use super::Context;

/// Agent management commands.
#[derive(Args, Debug)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommand {
    /// Create a new agent
    Create {
        /// Agent name
        #[arg(long)]
        name: String,

        /// Blueprint to instantiate
        #[arg(long)]
        blueprint: String,

        /// Knowledge base to attach
        #[arg(long)]
        knowledge_base: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Show an agent
    Get {
        /// Agent ID
        id: String,
    },

    /// List agents
    List {
        /// Maximum agents to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Retry while rate limited
        #[arg(long)]
        retry: bool,
    },

    /// Delete an agent
    Delete {
        /// Agent ID
        id: String,
    },
}

/// Run the agents command.
pub async fn run(args: AgentsArgs, ctx: &Context) -> Result<()> {
    let agents = ctx.client.agents();
    let dim = Style::new().dim();

    match args.command {
        AgentsCommand::Create {
            name,
            blueprint,
            knowledge_base,
            description,
        } => {
            let mut request = CreateAgentRequest::new(name, blueprint);
            request.knowledge_base_id = knowledge_base;
            request.description = description;

            let agent = agents.create(request).await.context("error creating agent")?;
            if ctx.json_output {
                ctx.print_json(&agent)?;
            } else {
                let green = Style::new().green();
                println!("{} Agent created: {}", green.apply_to("✓"), agent.id);
            }
        }
        AgentsCommand::Get { id } => {
            let agent = agents.get(&id).await.context("error getting agent")?;
            if ctx.json_output {
                ctx.print_json(&agent)?;
            } else {
                print_agent(&agent);
            }
        }
        AgentsCommand::List { limit, retry } => {
            let options = limit.map(ListOptions::limit);
            let listed = if retry {
                ctx.client.with_retry(|| agents.list(options)).await
            } else {
                agents.list(options).await
            }
            .context("error listing agents")?;

            if ctx.json_output {
                ctx.print_json(&listed)?;
            } else {
                println!("{}", style("Agents").bold());
                println!("{}", dim.apply_to("─".repeat(50)));
                if listed.is_empty() {
                    println!("{}", dim.apply_to("No agents found"));
                }
                print_agent_list(&listed);
            }
        }
        AgentsCommand::Delete { id } => {
            agents.delete(&id).await.context("error deleting agent")?;
            if !ctx.json_output {
                println!("{}", dim.apply_to(format!("Deleted agent {}", id)));
            }
        }
    }

    Ok(())
}

pub(crate) fn print_agent(agent: &Agent) {
    let dim = Style::new().dim();
    println!("Agent: {}", style(&agent.name).bold());
    println!("  {} {}", dim.apply_to("id:       "), agent.id);
    println!("  {} {}", dim.apply_to("blueprint:"), agent.blueprint_id);
    if let Some(kb) = &agent.knowledge_base_id {
        println!("  {} {}", dim.apply_to("kb:       "), kb);
    }
    if let Some(description) = &agent.description {
        println!("  {} {}", dim.apply_to("about:    "), description);
    }
}

pub(crate) fn print_agent_list(agents: &[Agent]) {
    println!("Found {} agents:", agents.len());
    for agent in agents {
        println!("- {} ({})", agent.name, agent.id);
    }
}
