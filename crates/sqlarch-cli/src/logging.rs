//! Tracing subscriber setup

use sqlarch_core::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Noisy HTTP internals stay at warn unless RUST_LOG says otherwise
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn";

/// Filter directives used when RUST_LOG is not set
pub fn default_directives(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.level.to_ascii_lowercase()
    };
    format!("{},{}", level, QUIET_DEPENDENCIES)
}

/// Install the global subscriber, writing to stderr
///
/// Set RUST_LOG to override the configured level entirely.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(config, verbose)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed in tests
    let _ = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let config = LoggingConfig::default();
        assert!(default_directives(&config, false).starts_with("warn,"));
        assert!(default_directives(&config, true).starts_with("debug,"));

        let config = LoggingConfig {
            level: "INFO".to_string(),
            format: LogFormat::Json,
        };
        assert!(default_directives(&config, false).starts_with("info,"));
    }
}
