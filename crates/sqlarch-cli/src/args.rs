//! CLI argument definitions using clap
//!
//! - sqlarch optimize "SELECT ..." --dialect postgresql
//! - sqlarch convert --file query.sql --from oracle --to mysql
//! - sqlarch models
//! - sqlarch config show | init | set-model | set-dialects | set-language

use clap::{Args, Parser, Subcommand};
use sqlarch_core::Dialect;
use sqlarch_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sqlarch")]
#[command(about = "SQL Architect - optimize SQL or convert it between dialects with Gemini")]
#[command(
    long_about = r#"SQL Architect - optimize SQL or convert it between dialects with Gemini

USAGE:
  sqlarch optimize "SELECT * FROM t" --dialect postgresql
  sqlarch convert --file query.sql --from oracle --to mysql
  cat query.sql | sqlarch optimize --dialect mysql --json

DIALECTS:
  postgresql, mysql, oracle, sqlserver, sqlite, msaccess

UTILITY COMMANDS:
  sqlarch models                 # List supported models
  sqlarch config init            # Create config file
  sqlarch config show            # Show effective config"#
)]
#[command(version)]
pub struct Cli {
    /// Model identifier (overrides config and SQLARCH_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Gemini API key (SQLARCH_API_KEY, GEMINI_API_KEY and GOOGLE_API_KEY are also read)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Gemini API base URL (overrides config and SQLARCH_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Language for explanations, tips and notes
    #[arg(long, global = true)]
    pub output_language: Option<String>,

    /// Log level such as warn, info or debug (RUST_LOG still wins)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to configuration file
    #[arg(
        long,
        global = true,
        env = "SQLARCH_CONFIG_FILE",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config_file: PathBuf,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output and debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Optimize a query for performance and readability
    Optimize {
        #[command(flatten)]
        input: SqlInputArgs,

        /// Dialect of the query (defaults to the configured source dialect)
        #[arg(long, short)]
        dialect: Option<Dialect>,

        /// Schema context such as CREATE TABLE statements
        #[arg(long, conflicts_with = "schema_file")]
        schema: Option<String>,

        /// Read schema context from a file
        #[arg(long)]
        schema_file: Option<PathBuf>,
    },

    /// Convert a query from one dialect to another
    Convert {
        #[command(flatten)]
        input: SqlInputArgs,

        /// Source dialect (defaults to the configured source dialect)
        #[arg(long)]
        from: Option<Dialect>,

        /// Target dialect (defaults to the configured target dialect)
        #[arg(long)]
        to: Option<Dialect>,
    },

    /// List supported models
    Models,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where the SQL text comes from; stdin when neither is given
#[derive(Args, Debug, Clone, Default)]
pub struct SqlInputArgs {
    /// SQL text
    #[arg(conflicts_with = "file")]
    pub sql: Option<String>,

    /// Read SQL from a file
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration and credential source
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Persist the preferred model
    SetModel {
        /// Model identifier, see `sqlarch models`
        model_id: String,
    },

    /// Persist the default source and target dialects
    SetDialects {
        #[arg(long)]
        from: Option<Dialect>,

        #[arg(long)]
        to: Option<Dialect>,
    },

    /// Persist the language used for explanations and notes
    SetLanguage {
        language: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_optimize() {
        let cli = Cli::try_parse_from([
            "sqlarch",
            "optimize",
            "SELECT * FROM t",
            "--dialect",
            "postgres",
            "--schema",
            "CREATE TABLE t (id INT)",
        ])
        .unwrap();

        match cli.command {
            Commands::Optimize {
                input,
                dialect,
                schema,
                ..
            } => {
                assert_eq!(input.sql.as_deref(), Some("SELECT * FROM t"));
                assert_eq!(dialect, Some(Dialect::PostgreSql));
                assert_eq!(schema.as_deref(), Some("CREATE TABLE t (id INT)"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config_file, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_parse_convert_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sqlarch", "convert", "--file", "q.sql", "--from", "oracle", "--to", "tsql",
            "--model", "gemini-2.5-pro", "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
        match cli.command {
            Commands::Convert { input, from, to } => {
                assert_eq!(input.file, Some(PathBuf::from("q.sql")));
                assert_eq!(from, Some(Dialect::Oracle));
                assert_eq!(to, Some(Dialect::SqlServer));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let result = Cli::try_parse_from(["sqlarch", "optimize", "SELECT 1", "--dialect", "db2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sql_and_file_conflict() {
        let result = Cli::try_parse_from(["sqlarch", "optimize", "SELECT 1", "--file", "q.sql"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_set_model() {
        let cli = Cli::try_parse_from(["sqlarch", "config", "set-model", "gemini-2.5-flash"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::SetModel { ref model_id }
            } if model_id == "gemini-2.5-flash"
        ));
    }

    #[test]
    fn test_parse_output_language_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sqlarch", "optimize", "SELECT 1", "--output-language", "English", "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.output_language.as_deref(), Some("English"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.base_url.is_none());
    }
}
