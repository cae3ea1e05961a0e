//! Input to a single orchestrator call

use super::{Dialect, Mode};
use crate::error::{SqlArchError, SqlArchResult};

/// Everything needed for one optimize or convert call.
///
/// Built fresh per invocation; nothing here outlives the call.
#[derive(Clone, PartialEq, Eq)]
pub struct ProcessingRequest {
    pub sql_text: String,
    pub mode: Mode,
    pub source_dialect: Dialect,
    /// Present iff `mode == Mode::Convert`
    pub target_dialect: Option<Dialect>,
    pub schema_context: Option<String>,
    pub model_id: String,
    /// Explicit key for this call; the orchestrator falls back to its
    /// ambient key when this is `None` or blank
    pub credential: Option<String>,
}

impl ProcessingRequest {
    /// Request an optimization pass
    pub fn optimize(
        sql_text: impl Into<String>,
        source_dialect: Dialect,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            sql_text: sql_text.into(),
            mode: Mode::Optimize,
            source_dialect,
            target_dialect: None,
            schema_context: None,
            model_id: model_id.into(),
            credential: None,
        }
    }

    /// Request a dialect conversion
    pub fn convert(
        sql_text: impl Into<String>,
        source_dialect: Dialect,
        target_dialect: Dialect,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            sql_text: sql_text.into(),
            mode: Mode::Convert,
            source_dialect,
            target_dialect: Some(target_dialect),
            schema_context: None,
            model_id: model_id.into(),
            credential: None,
        }
    }

    /// Attach table/column definitions to help the model
    pub fn with_schema_context(mut self, schema_context: impl Into<String>) -> Self {
        self.schema_context = Some(schema_context.into());
        self
    }

    /// Attach an explicit API key for this call
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Schema context with blank input treated as absent
    pub fn schema_context(&self) -> Option<&str> {
        self.schema_context
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Check the request invariants before anything leaves the process
    pub fn validate(&self) -> SqlArchResult<()> {
        if self.sql_text.trim().is_empty() {
            return Err(SqlArchError::invalid_input_field(
                "SQL text must not be empty",
                "sql_text",
            ));
        }

        if self.model_id.trim().is_empty() {
            return Err(SqlArchError::invalid_input_field(
                "Model identifier must not be empty",
                "model_id",
            ));
        }

        // The id becomes a single URL path segment
        if self
            .model_id
            .trim()
            .contains(|c: char| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace())
        {
            return Err(SqlArchError::invalid_input_field(
                format!("Model identifier '{}' contains invalid characters", self.model_id.trim()),
                "model_id",
            ));
        }

        if self.mode == Mode::Convert && self.target_dialect.is_none() {
            return Err(SqlArchError::invalid_input_field(
                "A target dialect is required when converting",
                "target_dialect",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ProcessingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessingRequest")
            .field("mode", &self.mode)
            .field("source_dialect", &self.source_dialect)
            .field("target_dialect", &self.target_dialect)
            .field("model_id", &self.model_id)
            .field("sql_len", &self.sql_text.len())
            .field("has_schema_context", &self.schema_context().is_some())
            .field("has_credential", &self.credential.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_request_is_valid() {
        let request =
            ProcessingRequest::optimize("SELECT * FROM t", Dialect::PostgreSql, "gemini-2.5-pro");
        assert!(request.validate().is_ok());
        assert_eq!(request.target_dialect, None);
    }

    #[test]
    fn test_blank_sql_rejected() {
        let request = ProcessingRequest::optimize("   \n", Dialect::MySql, "gemini-2.5-pro");
        let err = request.validate().unwrap_err();
        assert!(matches!(err, SqlArchError::InvalidInput { field: Some(ref f), .. } if f == "sql_text"));
    }

    #[test]
    fn test_convert_requires_target() {
        let mut request = ProcessingRequest::convert(
            "SELECT SYSDATE FROM DUAL",
            Dialect::Oracle,
            Dialect::MySql,
            "gemini-3-flash-preview",
        );
        assert!(request.validate().is_ok());

        request.target_dialect = None;
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("target dialect"));
    }

    #[test]
    fn test_model_id_must_be_one_path_segment() {
        for model in ["../upload", "gemini?alt=sse", "gemini#frag", "gemini pro", "a%2Fb"] {
            let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, model);
            let err = request.validate().unwrap_err();
            assert!(
                matches!(err, SqlArchError::InvalidInput { field: Some(ref f), .. } if f == "model_id"),
                "{} should be rejected",
                model
            );
        }

        let padded = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, " gemini-2.5-flash ");
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn test_blank_schema_context_is_absent() {
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::Sqlite, "m")
            .with_schema_context("  ");
        assert_eq!(request.schema_context(), None);

        let request = request.with_schema_context("CREATE TABLE t (id INT)");
        assert_eq!(request.schema_context(), Some("CREATE TABLE t (id INT)"));
    }

    #[test]
    fn test_debug_hides_credential() {
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::Sqlite, "m")
            .with_credential("AIza-secret-value");
        let debug = format!("{:?}", request);
        assert!(!debug.contains("AIza-secret-value"));
        assert!(debug.contains("has_credential: true"));
    }
}
