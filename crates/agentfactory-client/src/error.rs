//! Client error types.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error response.
    ///
    /// Throttling is reported here too, as status 429 with an optional
    /// `retry_after` hint.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error code from server.
        code: String,
        /// Error message from server.
        message: String,
        /// Suggested wait before retrying, if the server gave one.
        retry_after: Option<Duration>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request argument was rejected before anything was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The retry loop gave up while still being rate limited.
    #[error("max retries reached after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The last error observed.
        #[source]
        source: Box<Error>,
    },

    /// An error annotated with what the caller was doing.
    #[error("{context}: {source}")]
    Context {
        /// Description of the failed operation.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },
}

/// Classification of an [`Error`], for exhaustive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resource does not exist (404).
    NotFound,
    /// The credentials were rejected (401).
    Authentication,
    /// The service is throttling requests (429).
    RateLimited,
    /// Any other non-success status.
    Api(u16),
    /// Network or protocol failure.
    Transport,
    /// Malformed request or response body.
    Decode,
    /// Rejected client-side before sending.
    InvalidArgument,
    /// Client misconfiguration.
    Config,
    /// Retry budget used up.
    RetriesExhausted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Authentication => write!(f, "authentication failed"),
            ErrorKind::RateLimited => write!(f, "rate limited"),
            ErrorKind::Api(status) => write!(f, "API error (status {})", status),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Decode => write!(f, "decode error"),
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::Config => write!(f, "configuration error"),
            ErrorKind::RetriesExhausted => write!(f, "max retries reached"),
        }
    }
}

impl Error {
    /// Classify this error.
    ///
    /// Context wrappers are transparent: the kind of the wrapped error is
    /// returned.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Api { status: 404, .. } => ErrorKind::NotFound,
            Error::Api { status: 401, .. } => ErrorKind::Authentication,
            Error::Api { status: 429, .. } => ErrorKind::RateLimited,
            Error::Api { status, .. } => ErrorKind::Api(*status),
            Error::Http(e) if e.is_decode() => ErrorKind::Decode,
            Error::Http(_) => ErrorKind::Transport,
            Error::InvalidUrl(_) => ErrorKind::Config,
            Error::Json(_) => ErrorKind::Decode,
            Error::Config(_) => ErrorKind::Config,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
            Error::Context { source, .. } => source.kind(),
        }
    }

    /// The innermost error, looking through context and retry wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } | Error::RetriesExhausted { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status of the underlying API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-suggested wait before retrying.
    pub fn retry_after(&self) -> Option<Duration> {
        match self.root() {
            Error::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.kind() == ErrorKind::RateLimited
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Api(status) if status >= 500)
    }

    /// Wrap this error with a description of the failed operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Adds `.context(..)` to client results.
pub trait ResultExt<T> {
    /// Wrap the error, if any, with a description of the failed operation.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }
}

/// Error response from the server.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default = "unknown_code")]
    pub code: String,
    pub message: String,
    /// Seconds to wait, when the server reports it in the body.
    #[serde(default)]
    pub retry_after: Option<u64>,
}

fn unknown_code() -> String {
    "unknown".to_string()
}

/// Parse a `Retry-After` header value in seconds.
///
/// Zero is treated as "not specified".
pub(crate) fn parse_retry_after(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(seconds) => Some(Duration::from_secs(seconds)),
    }
}
