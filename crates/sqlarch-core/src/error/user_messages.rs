//! User-friendly error messages and classification
//!
//! Turns a `SqlArchError` into a title, a message and a short list of
//! suggested actions that a front end can show as-is.

use super::types::{SqlArchError, UnifiedError};
use crate::config::credential::STANDARD_ENV_VARS;

/// Broad bucket a failure falls into, used for headings and exit messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or unusable settings
    Configuration,
    /// The provider refused the key
    Authentication,
    /// Quota or request-rate limits
    RateLimit,
    /// The request never got a usable HTTP answer
    Network,
    /// The provider answered with something unusable
    Provider,
    /// Empty SQL, missing dialects and similar
    UserInput,
    /// Local file or serialization problems
    Internal,
}

impl ErrorCategory {
    /// Heading shown above the message
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Configuration => "Setup problem",
            Self::Authentication => "Access problem",
            Self::RateLimit => "Quota reached",
            Self::Network => "Connection problem",
            Self::Provider => "Processing failed",
            Self::UserInput => "Input problem",
            Self::Internal => "Local problem",
        }
    }
}

/// A failure rephrased for people, with things to try
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    pub category: ErrorCategory,
    /// One-line summary
    pub title: String,
    /// Full error text
    pub message: String,
    pub suggestions: Vec<String>,
    /// Whether trying again later could help
    pub is_retryable: bool,
    /// Stable `UnifiedError::error_code` of the source error
    pub error_code: String,
}

impl UserFriendlyError {
    pub fn new(
        category: ErrorCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
            suggestions: Vec::new(),
            is_retryable: false,
            error_code: String::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn retryable(mut self, is_retryable: bool) -> Self {
        self.is_retryable = is_retryable;
        self
    }

    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = code.into();
        self
    }

    /// Multi-line text for a terminal: heading, message, then suggestions
    pub fn format_display(&self) -> String {
        let mut lines = vec![format!("{} - {}", self.category.heading(), self.title)];
        if !self.error_code.is_empty() {
            lines.push(format!("code: {}", self.error_code));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        if !self.suggestions.is_empty() {
            lines.push(String::new());
            lines.push("Try:".to_string());
            lines.extend(self.suggestions.iter().map(|s| format!("  - {}", s)));
        }

        lines.join("\n")
    }
}

impl From<&SqlArchError> for UserFriendlyError {
    fn from(error: &SqlArchError) -> Self {
        let friendly = match error {
            SqlArchError::CredentialMissing { .. } => UserFriendlyError::new(
                ErrorCategory::Configuration,
                "No API key configured",
                error.to_string(),
            )
            .with_suggestion("Pass --api-key on the command line")
            .with_suggestion(format!(
                "Or set one of: {}",
                STANDARD_ENV_VARS.join(", ")
            ))
            .with_suggestion("Or add \"api_key\" to your sqlarch.json"),

            SqlArchError::AuthorizationDenied { model, .. } => {
                let title = match model {
                    Some(m) => format!("API key has no access to '{}'", m),
                    None => "Access denied".to_string(),
                };
                UserFriendlyError::new(ErrorCategory::Authentication, title, error.to_string())
                    .with_suggestion("Check that the API key is enabled for this model")
                    .with_suggestion("Try a different model with --model")
            }

            SqlArchError::RateLimited { .. } => UserFriendlyError::new(
                ErrorCategory::RateLimit,
                "Too many requests",
                error.to_string(),
            )
            .with_suggestion("Wait a moment and try again")
            .with_suggestion("Consider upgrading your API plan"),

            SqlArchError::InvalidCredential { .. } => UserFriendlyError::new(
                ErrorCategory::Authentication,
                "API key not recognized",
                error.to_string(),
            )
            .with_suggestion("Check that the API key is copied correctly")
            .with_suggestion("Ensure the API key has not been revoked"),

            SqlArchError::MalformedResponse { .. } => UserFriendlyError::new(
                ErrorCategory::Provider,
                "Unexpected response from the model",
                error.to_string(),
            )
            .with_suggestion("Try again; model output can vary between calls")
            .with_suggestion("Try a different model with --model"),

            SqlArchError::Transport { .. } => UserFriendlyError::new(
                ErrorCategory::Network,
                "Request failed",
                error.to_string(),
            )
            .with_suggestion("Check your internet connection")
            .with_suggestion("Verify the base URL in your configuration"),

            SqlArchError::Provider { status_code, .. } => UserFriendlyError::new(
                ErrorCategory::Provider,
                format!("Provider error (HTTP {})", status_code),
                error.to_string(),
            )
            .with_suggestion("Try again in a few moments"),

            SqlArchError::InvalidInput { field, .. } => {
                let title = match field {
                    Some(f) => format!("Invalid value for '{}'", f),
                    None => "Invalid input".to_string(),
                };
                UserFriendlyError::new(ErrorCategory::UserInput, title, error.to_string())
                    .with_suggestion("Check the input and try again")
            }

            SqlArchError::Config { .. } => UserFriendlyError::new(
                ErrorCategory::Configuration,
                "Configuration error",
                error.to_string(),
            )
            .with_suggestion("Run 'sqlarch config show' to inspect the effective settings")
            .with_suggestion("Run 'sqlarch config init --force' to regenerate the file"),

            SqlArchError::Io { path, .. } => {
                let title = if path.is_some() {
                    "File operation failed"
                } else {
                    "I/O error"
                };
                UserFriendlyError::new(ErrorCategory::Internal, title, error.to_string())
                    .with_suggestion("Check that the path exists and is readable")
            }

            SqlArchError::Json { .. } => UserFriendlyError::new(
                ErrorCategory::Internal,
                "Data format error",
                error.to_string(),
            ),
        };

        friendly
            .retryable(error.is_retryable())
            .with_error_code(error.error_code())
    }
}
