//! Core error types and traits for SQL Architect

use thiserror::Error;

/// Result type alias for SQL Architect operations
pub type SqlArchResult<T> = Result<T, SqlArchError>;

/// Unified error trait implemented by `SqlArchError`.
///
/// - error_code(): stable code for programmatic error identification
/// - message(): human-readable error message
/// - context(): optional additional context
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Whether waiting and trying again could plausibly succeed.
    ///
    /// Nothing in this crate retries on its own; this is advice for callers.
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for SQL Architect
#[derive(Error, Debug, Clone)]
pub enum SqlArchError {
    /// No API key from the caller, the environment, or the config file
    #[error("No API key configured: {message}")]
    CredentialMissing {
        message: String,
        context: Option<String>,
    },

    /// Provider rejected the key for this model (HTTP 403)
    #[error(
        "Access denied: {message}. The API key may not have access to the requested model"
    )]
    AuthorizationDenied {
        message: String,
        model: Option<String>,
        context: Option<String>,
    },

    /// Provider throttled the request (HTTP 429)
    #[error("Rate limit exceeded: {message}. Please retry later")]
    RateLimited {
        message: String,
        context: Option<String>,
    },

    /// Provider does not recognize the key
    #[error("Invalid API key: {message}")]
    InvalidCredential {
        message: String,
        context: Option<String>,
    },

    /// Provider answered, but not with a usable structured payload
    #[error("Processing failed: malformed response: {message}")]
    MalformedResponse {
        message: String,
        context: Option<String>,
    },

    /// Network failure, timeout, or an unreadable body
    #[error("Processing failed: {message}")]
    Transport {
        message: String,
        context: Option<String>,
    },

    /// Any other non-success provider status
    #[error("Processing failed: provider returned status {status_code}: {message}")]
    Provider {
        message: String,
        status_code: u16,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },
}
