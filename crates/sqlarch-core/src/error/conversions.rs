//! From trait implementations for SqlArchError conversions

use super::types::SqlArchError;

impl From<anyhow::Error> for SqlArchError {
    fn from(error: anyhow::Error) -> Self {
        // `{:#}` keeps the whole context chain on one line
        Self::io(format!("{:#}", error))
    }
}

impl From<std::io::Error> for SqlArchError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for SqlArchError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for SqlArchError {
    fn from(error: reqwest::Error) -> Self {
        // Strip the URL so nothing from the request line leaks into messages
        let error = error.without_url();
        let message = if error.is_timeout() {
            format!("request timed out: {}", error)
        } else if error.is_connect() {
            format!("connection failed: {}", error)
        } else if error.is_decode() {
            format!("failed to read response body: {}", error)
        } else {
            error.to_string()
        };
        Self::transport(message)
    }
}
