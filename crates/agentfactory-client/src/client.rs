//! Main client implementation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Method, RequestBuilder};
use url::Url;

use crate::api::{AgentsApi, KnowledgeBasesApi, WebhooksApi};
use crate::error::{Error, ErrorResponse, Result, parse_retry_after};
use crate::retry::RetryPolicy;

/// Default service URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "AGENTFACTORY_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "AGENTFACTORY_BASE_URL";

/// Key used when none is configured. The service will reject it.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Agent Factory API client.
///
/// Cheap to clone; all clones share one connection pool. The client is
/// read-only after construction.
///
/// # Example
///
/// ```no_run
/// use agentfactory_client::{Client, ListOptions};
///
/// # async fn example() -> agentfactory_client::Result<()> {
/// let client = Client::new("secret")?;
///
/// let agents = client.agents().list(Some(ListOptions::limit(10))).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    /// HTTP client.
    http: reqwest::Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Request timeout.
    timeout: Duration,
    /// Policy used by [`Client::with_retry`].
    retry_policy: RetryPolicy,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("retry_policy", &self.inner.retry_policy)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the default service URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client from `AGENTFACTORY_API_KEY` and `AGENTFACTORY_BASE_URL`.
    ///
    /// Falls back to a placeholder key when the variable is unset; requests
    /// will then fail authentication.
    pub fn from_env() -> Result<Self> {
        let api_key = match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!(
                    env_var = API_KEY_ENV,
                    "API key not set, using placeholder key"
                );
                PLACEHOLDER_API_KEY.to_string()
            }
        };

        let mut builder = Self::builder().api_key(api_key);
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The policy used by [`Client::with_retry`].
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry_policy
    }

    /// Run an operation under this client's retry policy.
    ///
    /// ```no_run
    /// # async fn example(client: agentfactory_client::Client) -> agentfactory_client::Result<()> {
    /// let agents = client.agents();
    /// let listed = client.with_retry(|| agents.list(None)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_retry<F, Fut, T>(&self, op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.inner.retry_policy.run(op).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the agents API.
    pub fn agents(&self) -> AgentsApi {
        AgentsApi::new(self.clone())
    }

    /// Access the knowledge bases API.
    pub fn knowledge_bases(&self) -> KnowledgeBasesApi {
        KnowledgeBasesApi::new(self.clone())
    }

    /// Access the webhooks API.
    pub fn webhooks(&self) -> WebhooksApi {
        WebhooksApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL from path segments. Each segment is percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.join("api/v1/")?;
        url.path_segments_mut()
            .map_err(|_| Error::Config("base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let request = self.request(Method::GET, segments)?;
        self.execute(request).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::GET, segments)?.query(query);
        self.execute(request).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::POST, segments)?.json(body);
        self.execute(request).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<()> {
        let response = self.request(Method::DELETE, segments)?.send().await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        Ok(())
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        tracing::debug!(method = %method, path = url.path(), "Sending request");
        Ok(self
            .inner
            .http
            .request(method, url)
            .timeout(self.inner.timeout))
    }

    async fn execute<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let header_retry = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);

        let error = match response.json::<ErrorResponse>().await {
            Ok(err) => Error::Api {
                status,
                code: err.code,
                message: err.message,
                retry_after: header_retry.or_else(|| {
                    err.retry_after
                        .filter(|secs| *secs > 0)
                        .map(Duration::from_secs)
                }),
            },
            Err(_) => Error::Api {
                status,
                code: "unknown".to_string(),
                message: format!("HTTP {}", status),
                retry_after: header_retry,
            },
        };

        tracing::debug!(status, error = %error, "Request failed");
        error
    }
}

/// Builder for creating a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    retry_policy: RetryPolicy,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Set the base URL for the service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key, sent as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the policy used by [`Client::with_retry`].
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        // Parse and normalize base URL
        let mut base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base_url '{}' is not a valid base URL",
                self.base_url
            )));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| Error::Config("Invalid API key".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        // Build HTTP client
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("agentfactory-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                retry_policy: self.retry_policy,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
