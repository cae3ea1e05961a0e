//! API key resolution
//!
//! Keys are looked up in priority order:
//! 1. CLI argument (`--api-key`)
//! 2. Environment variables, in `STANDARD_ENV_VARS` order
//! 3. The `api_key` field of the config file
//!
//! The first non-blank value wins.

use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Environment variables checked for an API key, highest priority first
pub const STANDARD_ENV_VARS: [&str; 3] = ["SQLARCH_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Where a resolved key came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    CliArgument,
    Environment(String),
    ConfigFile(Option<PathBuf>),
    NotFound,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliArgument => write!(f, "--api-key"),
            Self::Environment(var) => write!(f, "env {}", var),
            Self::ConfigFile(Some(path)) => write!(f, "config file {}", path.display()),
            Self::ConfigFile(None) => write!(f, "config file"),
            Self::NotFound => write!(f, "not configured"),
        }
    }
}

/// A key together with its origin
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    value: Option<String>,
    pub source: CredentialSource,
}

impl ResolvedCredential {
    pub fn new(value: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            value: Some(value.into()),
            source,
        }
    }

    pub fn missing() -> Self {
        Self {
            value: None,
            source: CredentialSource::NotFound,
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Key with everything but the first and last four characters hidden
    pub fn masked_key(&self) -> Option<String> {
        self.value.as_deref().map(mask_key)
    }
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("value", &self.masked_key())
            .field("source", &self.source)
            .finish()
    }
}

/// Mask an API key for display
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Resolves the API key from CLI, environment and config file
#[derive(Clone, Default)]
pub struct CredentialResolver {
    cli_key: Option<String>,
    config_key: Option<String>,
    config_path: Option<PathBuf>,
}

impl CredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cli_key(mut self, key: Option<String>) -> Self {
        self.cli_key = key;
        self
    }

    pub fn with_config_key(mut self, key: Option<String>, path: Option<PathBuf>) -> Self {
        self.config_key = key;
        self.config_path = path;
        self
    }

    /// Resolve against the process environment
    pub fn resolve(&self) -> ResolvedCredential {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` for environment variables
    pub fn resolve_with<F>(&self, lookup: F) -> ResolvedCredential
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = non_blank(self.cli_key.as_deref()) {
            debug!("Found API key from CLI argument");
            return ResolvedCredential::new(key, CredentialSource::CliArgument);
        }

        for var in STANDARD_ENV_VARS {
            if let Some(key) = non_blank(lookup(var).as_deref()) {
                debug!("Found API key from environment variable {}", var);
                return ResolvedCredential::new(key, CredentialSource::Environment(var.to_string()));
            }
        }

        if let Some(key) = non_blank(self.config_key.as_deref()) {
            debug!("Found API key from config file");
            return ResolvedCredential::new(
                key,
                CredentialSource::ConfigFile(self.config_path.clone()),
            );
        }

        debug!("No API key found");
        ResolvedCredential::missing()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
