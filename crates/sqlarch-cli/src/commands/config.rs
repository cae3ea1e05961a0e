//! Configuration management commands

use crate::console::CliConsole;
use colored::*;
use serde_json::json;
use sqlarch_core::config::model_catalog::find_model;
use sqlarch_core::config::{load_config_from_file, save_config};
use sqlarch_core::{Config, Dialect, LoadedConfig, SqlArchError, SqlArchResult};
use std::path::Path;
use tracing::{debug, info};

/// Show the effective configuration
pub async fn show(loaded: &LoadedConfig, json: bool) -> SqlArchResult<()> {
    let config = &loaded.config;
    let masked_key = loaded.credential.masked_key();

    if json {
        let mut visible = config.clone();
        visible.api_key = None;
        let output = json!({
            "configFile": loaded.config_path.as_ref().map(|p| p.display().to_string()),
            "config": visible,
            "credential": {
                "source": loaded.credential.source.to_string(),
                "key": masked_key,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let console = CliConsole::new(false);
    console.print_header("Configuration");

    match &loaded.config_path {
        Some(path) => console.success(&format!("Loaded configuration from: {}", path.display())),
        None => console.warn("No configuration file found, using defaults"),
    }

    let model = match find_model(&config.model) {
        Some(profile) => format!(
            "{} ({}, {})",
            config.model.green(),
            profile.display_name,
            profile.tier.engine_label()
        ),
        None => format!("{} (not in catalog)", config.model.yellow()),
    };
    console.print_field("Model", &model);
    console.print_field("Base URL", &config.base_url);
    console.print_field("Output language", &config.output_language);
    console.print_field("Default source", config.default_source_dialect.display_name());
    console.print_field("Default target", config.default_target_dialect.display_name());
    console.print_field(
        "Timeouts",
        &format!(
            "connect {}s, request {}s",
            config.timeouts.connect_timeout_secs, config.timeouts.request_timeout_secs
        ),
    );
    console.print_field(
        "Logging",
        &format!("{} ({:?})", config.logging.level, config.logging.format),
    );

    console.print_separator();
    let credential = match &masked_key {
        Some(masked) => format!("{} from {}", masked.green(), loaded.credential.source),
        None => format!("{}", "✗ Not set".red()),
    };
    console.print_field("API key", &credential);

    Ok(())
}

/// Create a new configuration file with defaults
pub async fn init(config_file: &Path, force: bool) -> SqlArchResult<()> {
    let console = CliConsole::new(false);
    console.print_header("Configuration Initialization");

    if config_file.exists() && !force {
        console.info("Use --force to overwrite");
        return Err(SqlArchError::config_with_context(
            format!("Configuration file already exists: {}", config_file.display()),
            "init refuses to overwrite without --force",
        ));
    }

    save_config(&Config::default(), config_file)?;

    console.success(&format!(
        "Created configuration file: {}",
        config_file.display()
    ));
    console.info("Set SQLARCH_API_KEY (or GEMINI_API_KEY) rather than storing the key in the file");
    Ok(())
}

/// Persist the preferred model
///
/// `loaded_from` is the file the effective config was read from; it seeds a
/// local file that does not exist yet.
pub async fn set_model(
    config_file: &Path,
    loaded_from: Option<&Path>,
    model_id: &str,
) -> SqlArchResult<()> {
    let model_id = model_id.trim().to_string();
    if model_id.is_empty() {
        return Err(SqlArchError::invalid_input_field(
            "Model id must not be empty",
            "model",
        ));
    }

    let console = CliConsole::new(false);
    if find_model(&model_id).is_none() {
        console.warn(&format!(
            "'{}' is not a catalogued model; it will be sent to the provider as-is",
            model_id
        ));
    }

    update_config_file(config_file, loaded_from, |config| config.model = model_id.clone())?;
    console.success(&format!("Default model set to {}", model_id));
    Ok(())
}

/// Persist default dialects; unspecified sides are left alone
pub async fn set_dialects(
    config_file: &Path,
    loaded_from: Option<&Path>,
    from: Option<Dialect>,
    to: Option<Dialect>,
) -> SqlArchResult<()> {
    if from.is_none() && to.is_none() {
        return Err(SqlArchError::invalid_input(
            "Pass --from and/or --to to change a default dialect",
        ));
    }

    let config = update_config_file(config_file, loaded_from, |config| {
        if let Some(from) = from {
            config.default_source_dialect = from;
        }
        if let Some(to) = to {
            config.default_target_dialect = to;
        }
    })?;

    CliConsole::new(false).success(&format!(
        "Default dialects: {} → {}",
        config.default_source_dialect, config.default_target_dialect
    ));
    Ok(())
}

/// Persist the output language
pub async fn set_language(
    config_file: &Path,
    loaded_from: Option<&Path>,
    language: &str,
) -> SqlArchResult<()> {
    let language = language.trim().to_string();
    update_config_file(config_file, loaded_from, |config| {
        config.output_language = language.clone()
    })?;
    CliConsole::new(false).success(&format!("Output language set to {}", language));
    Ok(())
}

/// Load the target file, else the file the config came from, else defaults;
/// apply `change`, validate and write the result to `config_file`
fn update_config_file<F>(
    config_file: &Path,
    loaded_from: Option<&Path>,
    change: F,
) -> SqlArchResult<Config>
where
    F: FnOnce(&mut Config),
{
    let base = if config_file.exists() {
        Some(config_file)
    } else {
        loaded_from.filter(|path| path.is_file())
    };

    let mut config = match base {
        Some(path) => {
            debug!("Starting from {}", path.display());
            load_config_from_file(path)?
        }
        None => Config::default(),
    };

    change(&mut config);
    config.validate()?;
    save_config(&config, config_file)?;

    info!(
        "Saved configuration to {} (api key stored: {})",
        config_file.display(),
        config.api_key.is_some()
    );
    Ok(config)
}
