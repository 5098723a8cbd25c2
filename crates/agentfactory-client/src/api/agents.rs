//! Agents API.

use super::{check_list_options, require_id, require_text, truncate};
use crate::api::ConversationsApi;
use crate::client::Client;
use crate::error::Result;
use crate::types::{Agent, CreateAgentRequest, ListOptions, ListResponse};

/// Agents API client.
pub struct AgentsApi {
    client: Client,
}

impl AgentsApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create an agent from a blueprint.
    pub async fn create(&self, request: CreateAgentRequest) -> Result<Agent> {
        require_text("agent name", &request.name)?;
        require_text("blueprint_id", &request.blueprint_id)?;
        self.client.post(&["agents"], &request).await
    }

    /// Get an agent by ID.
    pub async fn get(&self, id: &str) -> Result<Agent> {
        let id = require_id("agent", id)?;
        self.client.get(&["agents", id]).await
    }

    /// List agents. `None` uses the service's default page size.
    pub async fn list(&self, options: Option<ListOptions>) -> Result<Vec<Agent>> {
        let options = check_list_options(options)?;
        let response: ListResponse<Agent> =
            self.client.get_with_query(&["agents"], &options).await?;
        Ok(truncate(response.data, options.limit))
    }

    /// Delete an agent.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id("agent", id)?;
        self.client.delete(&["agents", id]).await
    }

    /// Conversations belonging to an agent.
    pub fn conversations(&self, agent_id: impl Into<String>) -> ConversationsApi {
        ConversationsApi::new(self.client.clone(), agent_id.into())
    }
}
