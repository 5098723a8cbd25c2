//! Webhooks API.

use url::Url;

use super::{check_list_options, require_id, require_text, truncate};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::types::{CreateWebhookRequest, ListOptions, ListResponse, Webhook};

/// Webhooks API client.
pub struct WebhooksApi {
    client: Client,
}

impl WebhooksApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Register a webhook.
    pub async fn create(&self, request: CreateWebhookRequest) -> Result<Webhook> {
        validate(&request)?;
        self.client.post(&["webhooks"], &request).await
    }

    /// Get a webhook by ID.
    pub async fn get(&self, id: &str) -> Result<Webhook> {
        let id = require_id("webhook", id)?;
        self.client.get(&["webhooks", id]).await
    }

    /// List webhooks.
    pub async fn list(&self, options: Option<ListOptions>) -> Result<Vec<Webhook>> {
        let options = check_list_options(options)?;
        let response: ListResponse<Webhook> =
            self.client.get_with_query(&["webhooks"], &options).await?;
        Ok(truncate(response.data, options.limit))
    }

    /// Remove a webhook.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id("webhook", id)?;
        self.client.delete(&["webhooks", id]).await
    }
}

fn validate(request: &CreateWebhookRequest) -> Result<()> {
    require_text("webhook name", &request.name)?;

    let url = Url::parse(&request.url)
        .map_err(|e| Error::InvalidArgument(format!("webhook url '{}': {}", request.url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidArgument(format!(
            "webhook url must be http or https, got '{}'",
            url.scheme()
        )));
    }

    if request.events.is_empty() {
        return Err(Error::InvalidArgument(
            "webhook must subscribe to at least one event".to_string(),
        ));
    }
    for event in &request.events {
        require_text("event name", event)?;
    }
    Ok(())
}
