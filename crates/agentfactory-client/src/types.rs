//! Request and response types for the Agent Factory API.
//!
//! These types mirror the service's API contract. Everything here is a
//! read-only projection of state owned by the service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Common
// ─────────────────────────────────────────────────────────────────────────────

/// Options for list endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of entities to return. `None` uses the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ListOptions {
    /// Options bounded to `limit` results.
    pub fn limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// Options for knowledge base queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryOptions {
    /// Maximum number of results.
    pub limit: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

impl QueryOptions {
    /// Options bounded to `limit` results.
    pub fn limit(limit: usize) -> Self {
        Self { limit }
    }
}

/// List envelope returned by every collection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub data: Vec<T>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Agents
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    /// Display name.
    pub name: String,
    /// Blueprint the agent is instantiated from.
    pub blueprint_id: String,
    /// Knowledge base to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateAgentRequest {
    /// Create a request with the required fields.
    pub fn new(name: impl Into<String>, blueprint_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blueprint_id: blueprint_id.into(),
            ..Default::default()
        }
    }

    /// Attach a knowledge base.
    pub fn with_knowledge_base(mut self, id: impl Into<String>) -> Self {
        self.knowledge_base_id = Some(id.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    /// Agent ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Blueprint ID.
    pub blueprint_id: String,
    /// Attached knowledge base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversations
// ─────────────────────────────────────────────────────────────────────────────

/// A conversation with an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    /// Conversation ID.
    pub id: String,
    /// Owning agent.
    pub agent_id: String,
    /// Creation time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Who sent a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message text.
    pub text: String,
    /// Sender role.
    pub role: Role,
    /// When the message was recorded (ISO 8601).
    pub timestamp: String,
}

/// Request body for sending a message.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub text: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Knowledge bases
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a knowledge base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateKnowledgeBaseRequest {
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateKnowledgeBaseRequest {
    /// Create a request with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeBase {
    /// Knowledge base ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of documents stored.
    #[serde(default)]
    pub document_count: usize,
}

/// Scalar metadata value attached to a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

/// A document to add to a knowledge base.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Text content.
    pub content: String,
    /// Scalar metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, MetadataValue>,
}

impl Document {
    /// Create a document with no metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A stored document, as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRef {
    /// Document ID.
    pub id: String,
    /// Owning knowledge base.
    pub knowledge_base_id: String,
    /// Stored metadata.
    #[serde(default)]
    pub metadata: HashMap<String, MetadataValue>,
}

/// Request body for knowledge base queries.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
}

/// A ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Document title.
    #[serde(default)]
    pub title: String,
    /// Matching excerpt.
    pub snippet: String,
    /// Relevance score; higher is better.
    pub score: f64,
    /// Source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhooks
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWebhookRequest {
    /// Display name.
    pub name: String,
    /// Delivery URL.
    pub url: String,
    /// Subscribed event names (e.g. `agent.created`).
    pub events: Vec<String>,
    /// Shared secret used to sign deliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl CreateWebhookRequest {
    /// Create a request with no events and no secret.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Subscribe to an event.
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Set the shared secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// A registered webhook.
///
/// The shared secret is write-only and never returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Webhook {
    /// Webhook ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Delivery URL.
    pub url: String,
    /// Subscribed events.
    #[serde(default)]
    pub events: Vec<String>,
    /// Whether deliveries are enabled.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}
