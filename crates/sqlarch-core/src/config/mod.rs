//! Configuration management

pub mod credential;
pub mod loader;
pub mod logging_config;
pub mod model;
pub mod model_catalog;
pub mod timeouts;

pub use credential::{CredentialResolver, CredentialSource, ResolvedCredential};
pub use loader::{
    CliOverrides, ConfigLoader, DEFAULT_CONFIG_FILE, LoadedConfig, global_config_path,
    load_config_from_file, save_config,
};
pub use logging_config::{LogFormat, LoggingConfig};
pub use model::{Config, DEFAULT_BASE_URL, DEFAULT_OUTPUT_LANGUAGE};
pub use model_catalog::{DEFAULT_MODEL, ModelProfile, ModelTier, ReasoningDepth};
pub use timeouts::TimeoutConfig;
