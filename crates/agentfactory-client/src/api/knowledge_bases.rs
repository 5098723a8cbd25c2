//! Knowledge bases API.

use super::{check_list_options, require_id, require_text, truncate};
use crate::api::DocumentsApi;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::types::{
    CreateKnowledgeBaseRequest, KnowledgeBase, ListOptions, ListResponse, QueryOptions,
    QueryRequest, SearchResult,
};

/// Knowledge bases API client.
pub struct KnowledgeBasesApi {
    client: Client,
}

impl KnowledgeBasesApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a knowledge base.
    pub async fn create(&self, request: CreateKnowledgeBaseRequest) -> Result<KnowledgeBase> {
        require_text("knowledge base name", &request.name)?;
        self.client.post(&["knowledge-bases"], &request).await
    }

    /// Get a knowledge base by ID.
    pub async fn get(&self, id: &str) -> Result<KnowledgeBase> {
        let id = require_id("knowledge base", id)?;
        self.client.get(&["knowledge-bases", id]).await
    }

    /// List knowledge bases.
    pub async fn list(&self, options: Option<ListOptions>) -> Result<Vec<KnowledgeBase>> {
        let options = check_list_options(options)?;
        let response: ListResponse<KnowledgeBase> = self
            .client
            .get_with_query(&["knowledge-bases"], &options)
            .await?;
        Ok(truncate(response.data, options.limit))
    }

    /// Delete a knowledge base and its documents.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id("knowledge base", id)?;
        self.client.delete(&["knowledge-bases", id]).await
    }

    /// Search a knowledge base.
    ///
    /// Results come back highest score first, at most `options.limit` of
    /// them (5 when `options` is `None`).
    pub async fn query(
        &self,
        id: &str,
        text: &str,
        options: Option<QueryOptions>,
    ) -> Result<Vec<SearchResult>> {
        let id = require_id("knowledge base", id)?;
        require_text("query", text)?;
        let options = options.unwrap_or_default();
        if options.limit == 0 {
            return Err(Error::InvalidArgument(
                "limit must be at least 1".to_string(),
            ));
        }

        let response: ListResponse<SearchResult> = self
            .client
            .post(
                &["knowledge-bases", id, "query"],
                &QueryRequest {
                    query: text,
                    limit: options.limit,
                },
            )
            .await?;

        Ok(rank(response.data, options.limit))
    }

    /// Documents stored in a knowledge base.
    pub fn documents(&self, knowledge_base_id: impl Into<String>) -> DocumentsApi {
        DocumentsApi::new(self.client.clone(), knowledge_base_id.into())
    }
}

/// Order by descending score, keeping service order among ties.
fn rank(mut results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    truncate(results, Some(limit))
}
