//! Constructor methods for SqlArchError

use super::types::SqlArchError;

impl SqlArchError {
    /// Create a missing credential error
    pub fn credential_missing(message: impl Into<String>) -> Self {
        Self::CredentialMissing {
            message: message.into(),
            context: None,
        }
    }

    /// Create an authorization denied error
    pub fn authorization_denied(message: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            message: message.into(),
            model: None,
            context: None,
        }
    }

    /// Create an authorization denied error naming the model that was refused
    pub fn authorization_denied_for_model(
        message: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::AuthorizationDenied {
            message: message.into(),
            model: Some(model.into()),
            context: None,
        }
    }

    /// Create a rate limited error
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
            context: None,
        }
    }

    /// Create an invalid credential error
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::InvalidCredential {
            message: message.into(),
            context: None,
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            context: None,
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            context: None,
        }
    }

    /// Create a generic provider error carrying the HTTP status
    pub fn provider(message: impl Into<String>, status_code: u16) -> Self {
        Self::Provider {
            message: message.into(),
            status_code,
            context: None,
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
            context: None,
        }
    }

    /// Create an invalid input error with field
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
            context: None,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create an IO error with message
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            context: None,
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            context: None,
        }
    }

    /// Create a JSON error with message
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to any error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let ctx = Some(context.into());
        match &mut self {
            Self::CredentialMissing { context: c, .. } => *c = ctx,
            Self::AuthorizationDenied { context: c, .. } => *c = ctx,
            Self::RateLimited { context: c, .. } => *c = ctx,
            Self::InvalidCredential { context: c, .. } => *c = ctx,
            Self::MalformedResponse { context: c, .. } => *c = ctx,
            Self::Transport { context: c, .. } => *c = ctx,
            Self::Provider { context: c, .. } => *c = ctx,
            Self::InvalidInput { context: c, .. } => *c = ctx,
            Self::Config { context: c, .. } => *c = ctx,
            Self::Io { context: c, .. } => *c = ctx,
            Self::Json { context: c, .. } => *c = ctx,
        }
        self
    }

    /// True for the kinds produced before any provider call is attempted
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Self::CredentialMissing { .. } | Self::InvalidInput { .. }
        )
    }
}
