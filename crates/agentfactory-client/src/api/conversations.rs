//! Conversations API.

use super::{check_list_options, require_id, require_text, truncate};
use crate::client::Client;
use crate::error::Result;
use crate::types::{Conversation, ListOptions, ListResponse, Message, SendMessageRequest};

/// Conversations API client, scoped to one agent.
pub struct ConversationsApi {
    client: Client,
    agent_id: String,
}

impl ConversationsApi {
    pub(crate) fn new(client: Client, agent_id: String) -> Self {
        Self { client, agent_id }
    }

    /// The agent these conversations belong to.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Start a new conversation.
    pub async fn create(&self) -> Result<Conversation> {
        let agent_id = require_id("agent", &self.agent_id)?;
        self.client
            .post(
                &["agents", agent_id, "conversations"],
                &serde_json::json!({}),
            )
            .await
    }

    /// Get a conversation by ID.
    pub async fn get(&self, conversation_id: &str) -> Result<Conversation> {
        let agent_id = require_id("agent", &self.agent_id)?;
        let conversation_id = require_id("conversation", conversation_id)?;
        self.client
            .get(&["agents", agent_id, "conversations", conversation_id])
            .await
    }

    /// List the agent's conversations.
    pub async fn list(&self, options: Option<ListOptions>) -> Result<Vec<Conversation>> {
        let agent_id = require_id("agent", &self.agent_id)?;
        let options = check_list_options(options)?;
        let response: ListResponse<Conversation> = self
            .client
            .get_with_query(&["agents", agent_id, "conversations"], &options)
            .await?;
        Ok(truncate(response.data, options.limit))
    }

    /// Send a user message and wait for the agent's reply.
    pub async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Message> {
        let agent_id = require_id("agent", &self.agent_id)?;
        let conversation_id = require_id("conversation", conversation_id)?;
        require_text("message text", text)?;

        self.client
            .post(
                &["agents", agent_id, "conversations", conversation_id, "messages"],
                &SendMessageRequest { text },
            )
            .await
    }

    /// Message history, oldest first.
    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let agent_id = require_id("agent", &self.agent_id)?;
        let conversation_id = require_id("conversation", conversation_id)?;
        let response: ListResponse<Message> = self
            .client
            .get(&["agents", agent_id, "conversations", conversation_id, "messages"])
            .await?;
        Ok(response.data)
    }
}
