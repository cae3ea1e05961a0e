//! Optimize and convert commands

use crate::args::SqlInputArgs;
use crate::console::CliConsole;
use crate::render;
use anyhow::Context;
use sqlarch_core::config::model_catalog::find_model;
use sqlarch_core::{
    Dialect, LoadedConfig, Mode, ProcessingRequest, SqlArchError, SqlArchResult, SqlOrchestrator,
};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments shared by `optimize` and `convert`
#[derive(Debug, Clone)]
pub struct ProcessArgs {
    pub mode: Mode,
    pub input: SqlInputArgs,
    pub source: Option<Dialect>,
    pub target: Option<Dialect>,
    pub schema: Option<String>,
    pub schema_file: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

/// Run one optimize or convert request and print the result
pub async fn execute(args: ProcessArgs, loaded: &LoadedConfig) -> SqlArchResult<()> {
    let sql = read_sql(&args.input)?;
    let schema = read_schema(args.schema.as_deref(), args.schema_file.as_deref())?;
    let request = build_request(&args, sql, schema, loaded)?;

    let mut console = CliConsole::new(args.verbose);
    console.detail(&format!(
        "Model: {} (credential from {})",
        request.model_id, loaded.credential.source
    ));

    let orchestrator = SqlOrchestrator::from_config(loaded)?;

    console.start_spinner(&spinner_message(&request));
    let outcome = orchestrator.process(&request).await;
    console.finish_spinner();
    let result = outcome?;

    if args.json {
        println!("{}", render::format_result_json(&result)?);
    } else {
        print!("{}", render::format_result(&result, request.mode));
    }

    Ok(())
}

/// Assemble the request from arguments and configured defaults
pub fn build_request(
    args: &ProcessArgs,
    sql: String,
    schema: Option<String>,
    loaded: &LoadedConfig,
) -> SqlArchResult<ProcessingRequest> {
    let config = &loaded.config;
    let source = args.source.unwrap_or(config.default_source_dialect);

    let request = match args.mode {
        Mode::Optimize => {
            let request = ProcessingRequest::optimize(sql, source, config.model.clone());
            match schema {
                Some(schema) => request.with_schema_context(schema),
                None => request,
            }
        }
        Mode::Convert => {
            let target = args.target.unwrap_or(config.default_target_dialect);
            ProcessingRequest::convert(sql, source, target, config.model.clone())
        }
    };

    request.validate()?;
    debug!("Built request: {:?}", request);
    Ok(request)
}

/// SQL from the positional argument, `--file`, or piped stdin
pub fn read_sql(input: &SqlInputArgs) -> SqlArchResult<String> {
    if let Some(sql) = &input.sql {
        return Ok(sql.clone());
    }

    if let Some(path) = &input.file {
        return Ok(read_text_file(path)?);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(SqlArchError::invalid_input_field(
            "No SQL given. Pass it as an argument, with --file, or on stdin",
            "sql_text",
        ));
    }
    Ok(read_from(stdin.lock())?)
}

/// Schema context from `--schema` or `--schema-file`
pub fn read_schema(
    schema: Option<&str>,
    schema_file: Option<&Path>,
) -> SqlArchResult<Option<String>> {
    if let Some(schema) = schema {
        return Ok(Some(schema.to_string()));
    }
    match schema_file {
        Some(path) => Ok(Some(read_text_file(path)?)),
        None => Ok(None),
    }
}

fn read_text_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_from<R: Read>(mut reader: R) -> anyhow::Result<String> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .context("Failed to read SQL from stdin")?;
    Ok(buffer)
}

fn spinner_message(request: &ProcessingRequest) -> String {
    let engine = find_model(&request.model_id)
        .map(|profile| profile.display_name.to_string())
        .unwrap_or_else(|| request.model_id.clone());

    match (request.mode, request.target_dialect) {
        (Mode::Convert, Some(target)) => format!(
            "Converting {} to {} with {}...",
            request.source_dialect, target, engine
        ),
        _ => format!("Optimizing {} with {}...", request.source_dialect, engine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlarch_core::config::{Config, ResolvedCredential};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn loaded() -> LoadedConfig {
        LoadedConfig {
            config: Config::default(),
            config_path: None,
            credential: ResolvedCredential::missing(),
        }
    }

    fn args(mode: Mode) -> ProcessArgs {
        ProcessArgs {
            mode,
            input: SqlInputArgs::default(),
            source: None,
            target: None,
            schema: None,
            schema_file: None,
            json: false,
            verbose: false,
        }
    }

    #[test]
    fn test_convert_uses_configured_defaults() {
        let request =
            build_request(&args(Mode::Convert), "SELECT 1".into(), None, &loaded()).unwrap();
        assert_eq!(request.source_dialect, Dialect::Oracle);
        assert_eq!(request.target_dialect, Some(Dialect::MySql));
        assert_eq!(request.model_id, "gemini-3-flash-preview");
    }

    #[test]
    fn test_optimize_with_explicit_dialect_and_schema() {
        let mut optimize = args(Mode::Optimize);
        optimize.source = Some(Dialect::Sqlite);

        let request = build_request(
            &optimize,
            "SELECT * FROM t".into(),
            Some("CREATE TABLE t (id INTEGER)".into()),
            &loaded(),
        )
        .unwrap();
        assert_eq!(request.source_dialect, Dialect::Sqlite);
        assert_eq!(request.target_dialect, None);
        assert_eq!(request.schema_context(), Some("CREATE TABLE t (id INTEGER)"));
    }

    #[test]
    fn test_blank_sql_rejected() {
        let err = build_request(&args(Mode::Optimize), "  \n".into(), None, &loaded()).unwrap_err();
        assert!(matches!(err, SqlArchError::InvalidInput { .. }));
    }

    #[test]
    fn test_read_sql_from_argument_and_file() {
        let input = SqlInputArgs {
            sql: Some("SELECT 1".into()),
            file: None,
        };
        assert_eq!(read_sql(&input).unwrap(), "SELECT 1");

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "SELECT 2 FROM DUAL").unwrap();
        let input = SqlInputArgs {
            sql: None,
            file: Some(file.path().to_path_buf()),
        };
        assert_eq!(read_sql(&input).unwrap(), "SELECT 2 FROM DUAL");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let input = SqlInputArgs {
            sql: None,
            file: Some(PathBuf::from("/nonexistent/query.sql")),
        };
        let err = read_sql(&input).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/query.sql"));
    }

    #[test]
    fn test_read_schema_prefers_inline() {
        assert_eq!(
            read_schema(Some("CREATE TABLE a (x INT)"), None).unwrap(),
            Some("CREATE TABLE a (x INT)".to_string())
        );
        assert_eq!(read_schema(None, None).unwrap(), None);
    }

    #[test]
    fn test_read_from_reader() {
        let sql = read_from("SELECT 3".as_bytes()).unwrap();
        assert_eq!(sql, "SELECT 3");
    }

    #[test]
    fn test_spinner_message_names_engine() {
        let request = ProcessingRequest::convert(
            "SELECT 1",
            Dialect::Oracle,
            Dialect::MsAccess,
            "gemini-2.5-pro",
        );
        let message = spinner_message(&request);
        assert!(message.contains("Gemini 2.5 Pro"));
        assert!(message.contains("MS Access"));
    }
}
