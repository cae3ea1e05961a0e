//! Configuration model

use super::credential::mask_key;
use super::logging_config::LoggingConfig;
use super::model_catalog::DEFAULT_MODEL;
use super::timeouts::TimeoutConfig;
use crate::error::{SqlArchError, SqlArchResult};
use crate::types::Dialect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Language the model writes explanations, tips and notes in
pub const DEFAULT_OUTPUT_LANGUAGE: &str = "Traditional Chinese";

/// Persisted user preferences and connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model identifier sent to the provider
    pub model: String,
    /// API key; prefer the environment over storing it here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Provider base URL without a trailing path
    pub base_url: String,
    /// Language for every non-code field of the response
    pub output_language: String,
    /// Source dialect used when the command line names none
    pub default_source_dialect: Dialect,
    /// Target dialect used when converting without `--to`
    pub default_target_dialect: Dialect,
    pub timeouts: TimeoutConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_language: DEFAULT_OUTPUT_LANGUAGE.to_string(),
            default_source_dialect: Dialect::Oracle,
            default_target_dialect: Dialect::MySql,
            timeouts: TimeoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_deref().map(mask_key))
            .field("base_url", &self.base_url)
            .field("output_language", &self.output_language)
            .field("default_source_dialect", &self.default_source_dialect)
            .field("default_target_dialect", &self.default_target_dialect)
            .field("timeouts", &self.timeouts)
            .field("logging", &self.logging)
            .finish()
    }
}

impl Config {
    /// Check that every value is usable
    pub fn validate(&self) -> SqlArchResult<()> {
        if self.model.trim().is_empty() {
            return Err(SqlArchError::config("Model must not be empty"));
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(SqlArchError::config_with_context(
                format!("Invalid base_url '{}'", self.base_url),
                "base_url must start with http:// or https://",
            ));
        }

        if self.output_language.trim().is_empty() {
            return Err(SqlArchError::config("output_language must not be empty"));
        }

        if self.timeouts.connect_timeout_secs == 0 || self.timeouts.request_timeout_secs == 0 {
            return Err(SqlArchError::config("Timeouts must be greater than zero"));
        }

        if !LoggingConfig::is_valid_level(&self.logging.level) {
            return Err(SqlArchError::config(format!(
                "Invalid log level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
