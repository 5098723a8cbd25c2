//! API endpoint implementations.

mod agents;
mod conversations;
mod documents;
mod knowledge_bases;
mod webhooks;

pub use agents::AgentsApi;
pub use conversations::ConversationsApi;
pub use documents::DocumentsApi;
pub use knowledge_bases::KnowledgeBasesApi;
pub use webhooks::WebhooksApi;

use crate::error::{Error, Result};
use crate::types::ListOptions;

/// Reject empty identifiers before they reach the wire.
pub(crate) fn require_id<'a>(what: &str, id: &'a str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{} id must not be empty", what)));
    }
    Ok(id)
}

/// Reject empty free-text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Validate list options. A zero limit is rejected.
pub(crate) fn check_list_options(options: Option<ListOptions>) -> Result<ListOptions> {
    let options = options.unwrap_or_default();
    if options.limit == Some(0) {
        return Err(Error::InvalidArgument("limit must be at least 1".to_string()));
    }
    Ok(options)
}

/// Enforce the requested bound even if the service returns more.
pub(crate) fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
