//! Documents API.

use super::{check_list_options, require_id, require_text, truncate};
use crate::client::Client;
use crate::error::Result;
use crate::types::{Document, DocumentRef, ListOptions, ListResponse};

/// Documents API client, scoped to one knowledge base.
pub struct DocumentsApi {
    client: Client,
    knowledge_base_id: String,
}

impl DocumentsApi {
    pub(crate) fn new(client: Client, knowledge_base_id: String) -> Self {
        Self {
            client,
            knowledge_base_id,
        }
    }

    /// The owning knowledge base.
    pub fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }

    /// Add a document.
    pub async fn add(&self, document: &Document) -> Result<DocumentRef> {
        let kb_id = require_id("knowledge base", &self.knowledge_base_id)?;
        require_text("document content", &document.content)?;
        self.client
            .post(&["knowledge-bases", kb_id, "documents"], document)
            .await
    }

    /// List stored documents.
    pub async fn list(&self, options: Option<ListOptions>) -> Result<Vec<DocumentRef>> {
        let kb_id = require_id("knowledge base", &self.knowledge_base_id)?;
        let options = check_list_options(options)?;
        let response: ListResponse<DocumentRef> = self
            .client
            .get_with_query(&["knowledge-bases", kb_id, "documents"], &options)
            .await?;
        Ok(truncate(response.data, options.limit))
    }
}
