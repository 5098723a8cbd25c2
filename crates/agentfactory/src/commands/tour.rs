//! Tour command - walk through every facade operation against a live service.
//!
//! Each step prints its outcome. A failing step is reported and the tour
//! moves on; steps that need an earlier result are skipped when it is
//! missing.

use anyhow::{Context as _, Result};
use clap::Args;
use console::{Style, style};

use agentfactory_client::{
    Agent, CreateAgentRequest, CreateKnowledgeBaseRequest, CreateWebhookRequest, Document,
    KnowledgeBase, ListOptions, Message, QueryOptions, SearchResult, Webhook,
};

use super::{Context, agents::print_agent_list, errors::describe, kb::print_results, print_error};

/// Arguments for the tour command.
#[derive(Args, Debug)]
pub struct TourArgs {
    /// Message sent in the chat step
    #[arg(long, default_value = "Hello, how can you help me?")]
    pub message: String,

    /// Query used in the knowledge base step
    #[arg(long, default_value = "What is Product X?")]
    pub query: String,

    /// Agent ID looked up in the error handling step
    #[arg(long, default_value = "invalid_agent_id")]
    pub missing_agent: String,
}

/// Run the tour. Always succeeds; step failures are reported inline.
pub async fn run(args: TourArgs, ctx: &Context) -> Result<()> {
    let bold = Style::new().bold();
    let rule = "=".repeat(30);

    println!("{}", bold.apply_to("Agent Factory Rust SDK Examples"));
    println!("{}", rule);

    step(1, "Creating agent");
    let agent = report(create_agent(ctx).await);
    if let Some(agent) = &agent {
        step(2, "Getting agent");
        report(get_agent(ctx, &agent.id).await);

        step(3, "Chatting with agent");
        report(chat(ctx, &agent.id, &args.message).await);
    }

    step(4, "Creating knowledge base");
    let kb = report(create_knowledge_base(ctx).await);
    if let Some(kb) = &kb {
        step(5, "Querying knowledge base");
        report(query_knowledge_base(ctx, &kb.id, &args.query).await);
    }

    step(6, "Creating webhook");
    report(create_webhook(ctx).await);

    step(7, "Listing agents");
    report(list_agents(ctx).await);

    step(8, "Rate limit handling");
    report(list_agents_with_retry(ctx).await);

    step(9, "Error handling");
    match ctx.client.agents().get(&args.missing_agent).await {
        Ok(found) => println!("Agent exists: {}", found.id),
        Err(e) => println!("{}", describe(&e)),
    }

    println!("\n{}", rule);
    println!("{}", style("Examples completed!").green());
    Ok(())
}

fn step(number: u32, title: &str) {
    println!("\n{}. {}...", number, title);
}

/// Log and print a failed step, keeping the value of a successful one.
fn report<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "Tour step failed");
            print_error(&format!("{:#}", e));
            None
        }
    }
}

async fn create_agent(ctx: &Context) -> Result<Agent> {
    let request = CreateAgentRequest::new("Customer Support Bot", "support_bot_blueprint")
        .with_knowledge_base("kb_123")
        .with_description("AI-powered customer support agent");
    let agent = ctx
        .client
        .agents()
        .create(request)
        .await
        .context("error creating agent")?;
    println!("Agent created: {}", agent.id);
    Ok(agent)
}

async fn get_agent(ctx: &Context, id: &str) -> Result<Agent> {
    let agent = ctx
        .client
        .agents()
        .get(id)
        .await
        .context("error getting agent")?;
    println!("Agent: {}", agent.name);
    Ok(agent)
}

async fn chat(ctx: &Context, agent_id: &str, text: &str) -> Result<Message> {
    let agent = ctx
        .client
        .agents()
        .get(agent_id)
        .await
        .context("error getting agent")?;
    let conversations = ctx.client.agents().conversations(&agent.id);
    let conversation = conversations
        .create()
        .await
        .context("error creating conversation")?;
    let reply = conversations
        .send_message(&conversation.id, text)
        .await
        .context("error sending message")?;
    println!("Agent response: {}", reply.text);
    Ok(reply)
}

async fn create_knowledge_base(ctx: &Context) -> Result<KnowledgeBase> {
    let kbs = ctx.client.knowledge_bases();
    let request = CreateKnowledgeBaseRequest::new("Product Knowledge Base")
        .with_description("Knowledge base for product information");
    let kb = kbs
        .create(request)
        .await
        .context("error creating knowledge base")?;
    println!("Knowledge base created: {}", kb.id);

    let document = Document::new("Product X is our flagship product...")
        .with_metadata("title", "Product X Overview")
        .with_metadata("category", "products");
    kbs.documents(&kb.id)
        .add(&document)
        .await
        .context("error adding document")?;
    println!("Document added to knowledge base");
    Ok(kb)
}

async fn query_knowledge_base(ctx: &Context, id: &str, query: &str) -> Result<Vec<SearchResult>> {
    let kbs = ctx.client.knowledge_bases();
    let kb = kbs.get(id).await.context("error getting knowledge base")?;
    let results = kbs
        .query(&kb.id, query, Some(QueryOptions::limit(5)))
        .await
        .context("error querying knowledge base")?;
    print_results(&results);
    Ok(results)
}

async fn create_webhook(ctx: &Context) -> Result<Webhook> {
    let request =
        CreateWebhookRequest::new("My Webhook", "https://example.com/webhooks/agentfactory")
            .event("agent.created")
            .event("conversation.message")
            .with_secret("your_webhook_secret");
    let webhook = ctx
        .client
        .webhooks()
        .create(request)
        .await
        .context("error creating webhook")?;
    println!("Webhook created: {}", webhook.id);
    Ok(webhook)
}

async fn list_agents(ctx: &Context) -> Result<Vec<Agent>> {
    let listed = ctx
        .client
        .agents()
        .list(Some(ListOptions::limit(10)))
        .await
        .context("error listing agents")?;
    print_agent_list(&listed);
    Ok(listed)
}

async fn list_agents_with_retry(ctx: &Context) -> Result<Vec<Agent>> {
    let agents = ctx.client.agents();
    let listed = ctx
        .client
        .with_retry(|| agents.list(None))
        .await
        .context("error listing agents")?;
    println!("Listed {} agents without hitting the rate limit", listed.len());
    Ok(listed)
}
