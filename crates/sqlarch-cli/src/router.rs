//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands::{self, ProcessArgs};
use crate::logging;
use sqlarch_core::config::LoggingConfig;
use sqlarch_core::{CliOverrides, ConfigLoader, LoadedConfig, Mode, SqlArchResult};
use tracing::debug;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> SqlArchResult<()> {
    // init must work even when the existing file is broken
    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = &cli.command
    {
        logging::init(&LoggingConfig::default(), cli.verbose);
        return commands::config::init(&cli.config_file, *force).await;
    }

    let loaded = load_config(&cli)?;
    logging::init(&loaded.config.logging, cli.verbose);
    debug!("Effective configuration: {:?}", loaded.config);

    match cli.command {
        Commands::Optimize {
            input,
            dialect,
            schema,
            schema_file,
        } => {
            let args = ProcessArgs {
                mode: Mode::Optimize,
                input,
                source: dialect,
                target: None,
                schema,
                schema_file,
                json: cli.json,
                verbose: cli.verbose,
            };
            commands::process_execute(args, &loaded).await
        }
        Commands::Convert { input, from, to } => {
            let args = ProcessArgs {
                mode: Mode::Convert,
                input,
                source: from,
                target: to,
                schema: None,
                schema_file: None,
                json: cli.json,
                verbose: cli.verbose,
            };
            commands::process_execute(args, &loaded).await
        }
        Commands::Models => commands::models::list(&loaded.config.model, cli.json).await,
        Commands::Config { action } => {
            route_config(action, &cli.config_file, &loaded, cli.json).await
        }
    }
}

/// Defaults, then the config file, then the environment, then flags
fn load_config(cli: &Cli) -> SqlArchResult<LoadedConfig> {
    config_loader(cli).load()
}

fn config_loader(cli: &Cli) -> ConfigLoader {
    let mut overrides = CliOverrides::new();
    if let Some(model) = &cli.model {
        overrides = overrides.with_model(model.clone());
    }
    if let Some(api_key) = &cli.api_key {
        overrides = overrides.with_api_key(api_key.clone());
    }
    if let Some(base_url) = &cli.base_url {
        overrides = overrides.with_base_url(base_url.clone());
    }
    if let Some(language) = &cli.output_language {
        overrides = overrides.with_output_language(language.clone());
    }
    if let Some(level) = &cli.log_level {
        overrides = overrides.with_log_level(level.clone());
    }

    ConfigLoader::new()
        .with_file(&cli.config_file)
        .with_global_fallback()
        .with_overrides(overrides)
}

async fn route_config(
    action: ConfigAction,
    config_file: &std::path::Path,
    loaded: &LoadedConfig,
    json: bool,
) -> SqlArchResult<()> {
    let loaded_from = loaded.config_path.as_deref();
    match action {
        ConfigAction::Show => commands::config::show(loaded, json).await,
        ConfigAction::Init { force } => commands::config::init(config_file, force).await,
        ConfigAction::SetModel { model_id } => {
            commands::config::set_model(config_file, loaded_from, &model_id).await
        }
        ConfigAction::SetDialects { from, to } => {
            commands::config::set_dialects(config_file, loaded_from, from, to).await
        }
        ConfigAction::SetLanguage { language } => {
            commands::config::set_language(config_file, loaded_from, &language).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sqlarch.json");
        fs::write(&path, r#"{"model": "gemini-2.5-flash", "output_language": "English"}"#)
            .unwrap();

        let cli = Cli::try_parse_from([
            "sqlarch",
            "models",
            "--config-file",
            path.to_str().unwrap(),
            "--model",
            "gemini-2.5-pro",
            "--api-key",
            "flag-key-123456789",
        ])
        .unwrap();

        let loaded = config_loader(&cli).load_with_env(|_| None).unwrap();
        assert_eq!(loaded.config.model, "gemini-2.5-pro");
        assert_eq!(loaded.config.output_language, "English");
        assert_eq!(loaded.credential.value(), Some("flag-key-123456789"));
        assert_eq!(loaded.config_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_init_ignores_broken_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sqlarch.json");
        fs::write(&path, "{ not json").unwrap();

        let cli = Cli::try_parse_from([
            "sqlarch",
            "config",
            "init",
            "--force",
            "--config-file",
            path.to_str().unwrap(),
        ])
        .unwrap();

        route(cli).await.unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("gemini-3-flash-preview"));
    }

    #[test]
    fn test_language_and_log_level_flags_override_env() {
        let cli = Cli::try_parse_from([
            "sqlarch",
            "models",
            "--config-file",
            "/nonexistent/sqlarch.json",
            "--output-language",
            "Japanese",
            "--log-level",
            "info",
            "--base-url",
            "http://127.0.0.1:8080",
        ])
        .unwrap();

        let loaded = config_loader(&cli)
            .load_with_env(|name| {
                (name == "SQLARCH_OUTPUT_LANGUAGE").then(|| "English".to_string())
            })
            .unwrap();
        assert_eq!(loaded.config.output_language, "Japanese");
        assert_eq!(loaded.config.logging.level, "info");
        assert_eq!(loaded.config.base_url, "http://127.0.0.1:8080");
    }
}
