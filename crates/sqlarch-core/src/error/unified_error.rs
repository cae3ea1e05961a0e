//! UnifiedError trait implementation for SqlArchError

use super::types::{SqlArchError, UnifiedError};

impl UnifiedError for SqlArchError {
    fn error_code(&self) -> &str {
        match self {
            Self::CredentialMissing { .. } => "SQLARCH_CREDENTIAL_MISSING",
            Self::AuthorizationDenied { .. } => "SQLARCH_AUTHORIZATION_DENIED",
            Self::RateLimited { .. } => "SQLARCH_RATE_LIMITED",
            Self::InvalidCredential { .. } => "SQLARCH_INVALID_CREDENTIAL",
            Self::MalformedResponse { .. } => "SQLARCH_MALFORMED_RESPONSE",
            Self::Transport { .. } => "SQLARCH_TRANSPORT",
            Self::Provider { .. } => "SQLARCH_PROVIDER",
            Self::InvalidInput { .. } => "SQLARCH_INVALID_INPUT",
            Self::Config { .. } => "SQLARCH_CONFIG",
            Self::Io { .. } => "SQLARCH_IO",
            Self::Json { .. } => "SQLARCH_JSON",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::CredentialMissing { message, .. } => message,
            Self::AuthorizationDenied { message, .. } => message,
            Self::RateLimited { message, .. } => message,
            Self::InvalidCredential { message, .. } => message,
            Self::MalformedResponse { message, .. } => message,
            Self::Transport { message, .. } => message,
            Self::Provider { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
            Self::Config { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Json { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::CredentialMissing { context, .. } => context.as_deref(),
            Self::AuthorizationDenied { context, .. } => context.as_deref(),
            Self::RateLimited { context, .. } => context.as_deref(),
            Self::InvalidCredential { context, .. } => context.as_deref(),
            Self::MalformedResponse { context, .. } => context.as_deref(),
            Self::Transport { context, .. } => context.as_deref(),
            Self::Provider { context, .. } => context.as_deref(),
            Self::InvalidInput { context, .. } => context.as_deref(),
            Self::Config { context, .. } => context.as_deref(),
            Self::Io { context, .. } => context.as_deref(),
            Self::Json { context, .. } => context.as_deref(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Transport { .. } => true,
            Self::Provider { status_code, .. } => matches!(status_code, 500..=599),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_and_throttled_have_distinct_codes() {
        let denied = SqlArchError::authorization_denied("permission denied");
        let limited = SqlArchError::rate_limited("quota exhausted");

        assert_ne!(denied.error_code(), limited.error_code());
        assert_ne!(denied.to_string(), limited.to_string());
        assert!(denied.to_string().contains("may not have access"));
        assert!(limited.to_string().contains("retry later"));
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(SqlArchError::rate_limited("slow down").is_retryable());
        assert!(SqlArchError::transport("connection reset").is_retryable());
        assert!(SqlArchError::provider("unavailable", 503).is_retryable());
        assert!(!SqlArchError::provider("bad request", 400).is_retryable());
        assert!(!SqlArchError::invalid_credential("bad key").is_retryable());
        assert!(!SqlArchError::credential_missing("none").is_retryable());
    }

    #[test]
    fn test_context_roundtrip() {
        let err = SqlArchError::malformed_response("missing explanation")
            .with_context("Parsing payload for gemini-3-flash-preview");
        assert_eq!(
            err.context(),
            Some("Parsing payload for gemini-3-flash-preview")
        );
        assert_eq!(err.message(), "missing explanation");
    }
}
