//! Layered configuration loading
//!
//! Sources are merged in this order, later ones winning:
//! defaults → config file → environment → CLI overrides.

use super::credential::{CredentialResolver, ResolvedCredential};
use super::model::Config;
use crate::error::{SqlArchError, SqlArchResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sqlarch.json";

/// `~/.config/sqlarch/sqlarch.json` (platform equivalent)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sqlarch").join(DEFAULT_CONFIG_FILE))
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub output_language: Option<String>,
    pub log_level: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_output_language(mut self, language: impl Into<String>) -> Self {
        self.output_language = Some(language.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }
}

/// Result of a load: the merged config plus where things came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// The file that was actually read, if any
    pub config_path: Option<PathBuf>,
    pub credential: ResolvedCredential,
}

/// Configuration loader
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    use_global_fallback: bool,
    overrides: CliOverrides,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this file if it exists
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Fall back to the global config file when the local one is missing
    pub fn with_global_fallback(mut self) -> Self {
        self.use_global_fallback = true;
        self
    }

    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load using the process environment
    pub fn load(self) -> SqlArchResult<LoadedConfig> {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` for environment variables
    pub fn load_with_env<F>(self, lookup: F) -> SqlArchResult<LoadedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = self.locate_file();
        let mut config = match &config_path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                load_config_from_file(path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        apply_env(&mut config, &lookup);
        self.apply_overrides(&mut config);
        config.validate()?;

        let credential = CredentialResolver::new()
            .with_cli_key(self.overrides.api_key.clone())
            .with_config_key(config.api_key.clone(), config_path.clone())
            .resolve_with(&lookup);

        debug!(
            "Effective model: {}, credential source: {}",
            config.model, credential.source
        );

        Ok(LoadedConfig {
            config,
            config_path,
            credential,
        })
    }

    fn locate_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_file {
            if path.is_file() {
                return Some(path.clone());
            }
            debug!("Configuration file {} not found", path.display());
        }

        if self.use_global_fallback {
            if let Some(global) = global_config_path() {
                if global.is_file() {
                    return Some(global);
                }
            }
        }

        None
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.overrides.model {
            config.model = model.clone();
        }
        if let Some(base_url) = &self.overrides.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(language) = &self.overrides.output_language {
            config.output_language = language.clone();
        }
        if let Some(level) = &self.overrides.log_level {
            config.logging.level = level.clone();
        }
    }
}

fn apply_env<F>(config: &mut Config, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(model) = non_blank("SQLARCH_MODEL") {
        config.model = model;
    }
    if let Some(base_url) = non_blank("SQLARCH_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(language) = non_blank("SQLARCH_OUTPUT_LANGUAGE") {
        config.output_language = language;
    }
    if let Some(level) = non_blank("SQLARCH_LOG_LEVEL") {
        config.logging.level = level;
    }
}

/// Parse a JSON config file
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> SqlArchResult<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        SqlArchError::config_with_context(
            format!("Failed to read configuration file: {}", e),
            path.display().to_string(),
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SqlArchError::config_with_context(
            format!("Invalid configuration file: {}", e),
            path.display().to_string(),
        )
    })
}

/// Write `config` as pretty JSON, creating parent directories
pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> SqlArchResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| SqlArchError::io_with_path(e.to_string(), parent.display().to_string()))?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
        .map_err(|e| SqlArchError::io_with_path(e.to_string(), path.display().to_string()))?;
    Ok(())
}
