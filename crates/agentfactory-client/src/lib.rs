//! HTTP client SDK for the Agent Factory platform.
//!
//! This crate provides a typed client for the Agent Factory service API.
//!
//! # Example
//!
//! ```no_run
//! use agentfactory_client::{Client, CreateAgentRequest, ErrorKind, Result};
//!
//! # async fn example() -> Result<()> {
//! // Reads AGENTFACTORY_API_KEY
//! let client = Client::from_env()?;
//!
//! // Create an agent
//! let agent = client
//!     .agents()
//!     .create(
//!         CreateAgentRequest::new("Customer Support Bot", "support_bot_blueprint")
//!             .with_description("AI-powered customer support agent"),
//!     )
//!     .await?;
//!
//! // Chat with it
//! let conversations = client.agents().conversations(&agent.id);
//! let conversation = conversations.create().await?;
//! let reply = conversations
//!     .send_message(&conversation.id, "Hello, how can you help me?")
//!     .await?;
//! println!("Agent response: {}", reply.text);
//!
//! // Classify failures
//! match client.agents().get("invalid_agent_id").await {
//!     Ok(agent) => println!("Agent: {}", agent.name),
//!     Err(e) => match e.kind() {
//!         ErrorKind::NotFound => println!("Agent not found"),
//!         ErrorKind::Authentication => println!("Authentication failed"),
//!         ErrorKind::RateLimited => println!("Rate limit exceeded"),
//!         _ => println!("Error: {}", e),
//!     },
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Agents**: create, get, list, delete
//! - **Conversations**: create, send messages, read history
//! - **Knowledge bases**: create, get, list, delete, query
//! - **Documents**: add and list documents in a knowledge base
//! - **Webhooks**: create, get, list, delete
//!
//! Rate-limited calls can be retried with [`RetryPolicy`] or
//! [`Client::with_retry`].

pub mod api;
pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::{
    API_KEY_ENV, BASE_URL_ENV, Client, ClientBuilder, DEFAULT_BASE_URL, PLACEHOLDER_API_KEY,
};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use retry::{Backoff, RetryPolicy};
pub use types::*;
