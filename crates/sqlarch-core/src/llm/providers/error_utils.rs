//! Provider error body helpers: secret redaction and Google RPC error parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Longest error text surfaced to users, in characters
const ERROR_TEXT_LIMIT: usize = 1_024;

struct SecretRule {
    pattern: Regex,
    replacement: &'static str,
}

/// Applied in order; later rules see the output of earlier ones
static SECRET_RULES: Lazy<Vec<SecretRule>> = Lazy::new(|| {
    let rule = |pattern: &str, replacement| SecretRule {
        pattern: Regex::new(pattern).expect("secret pattern must compile"),
        replacement,
    };
    vec![
        // Google API keys, wherever they appear
        rule(r"AIza[0-9A-Za-z_\-]{20,}", "[REDACTED]"),
        rule(r"(?i)\bBearer\s+[A-Za-z0-9._\-+/=]{8,}", "Bearer [REDACTED]"),
        // key=..., "api_key": "...", x-goog-api-key: ...
        rule(
            r#"(?i)\b(x-goog-api-key|api[_-]?key|key|access[_-]?token|token|secret|password|authorization)\b(["']?\s*[:=]\s*["']?)[^"',\s}&]+"#,
            "$1$2[REDACTED]",
        ),
    ]
});

/// Redact credentials and clip the text to a displayable length
pub fn sanitize_provider_error_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty error response body>".to_string();
    }

    let redacted = SECRET_RULES
        .iter()
        .fold(trimmed.to_string(), |text, rule| {
            rule.pattern
                .replace_all(&text, rule.replacement)
                .into_owned()
        });
    clip(redacted)
}

fn clip(text: String) -> String {
    match text.char_indices().nth(ERROR_TEXT_LIMIT) {
        None => text,
        Some((cut, _)) => {
            let dropped = text[cut..].chars().count();
            format!("{}... ({} more chars)", &text[..cut], dropped)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorEnvelope {
    error: RpcError,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<RpcErrorDetail>,
}

/// Only `google.rpc.ErrorInfo` entries carry a reason
#[derive(Debug, Deserialize)]
struct RpcErrorDetail {
    reason: Option<String>,
}

/// The useful parts of a Google RPC error body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderErrorBody {
    /// Sanitized human-readable message
    pub message: String,
    /// RPC status such as `PERMISSION_DENIED`
    pub status: Option<String>,
    /// First `ErrorInfo.reason`, such as `API_KEY_INVALID`
    pub reason: Option<String>,
}

/// Parse an error body, falling back to the sanitized raw text
pub fn parse_provider_error_body(raw: &str) -> ProviderErrorBody {
    let envelope = serde_json::from_str::<RpcErrorEnvelope>(raw)
        .ok()
        .filter(|envelope| !envelope.error.message.trim().is_empty());

    match envelope {
        Some(RpcErrorEnvelope { error }) => ProviderErrorBody {
            message: sanitize_provider_error_text(&error.message),
            status: error.status,
            reason: error.details.into_iter().find_map(|detail| detail.reason),
        },
        None => ProviderErrorBody {
            message: sanitize_provider_error_text(raw),
            status: None,
            reason: None,
        },
    }
}
