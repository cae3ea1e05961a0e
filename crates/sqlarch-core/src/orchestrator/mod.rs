//! Request orchestration
//!
//! `SqlOrchestrator` turns one `ProcessingRequest` into exactly one provider
//! call and normalizes the structured answer into a `ProcessingResult`.
//! Validation and credential resolution happen before any network activity.

pub mod payload;
pub mod prompts;

use crate::config::model_catalog::reasoning_depth_for;
use crate::config::{DEFAULT_OUTPUT_LANGUAGE, LoadedConfig};
use crate::error::{SqlArchError, SqlArchResult, UnifiedError};
use crate::llm::{
    CompletionProvider, GeminiProvider, GenerationRequest, processing_response_schema,
};
use crate::types::{Mode, ProcessingRequest, ProcessingResult};
use tracing::{debug, info, instrument, warn};

pub use payload::{ProcessedPayload, parse_payload};

/// Drives a single optimize or convert call against a provider
pub struct SqlOrchestrator<P: CompletionProvider> {
    provider: P,
    ambient_credential: Option<String>,
    output_language: String,
}

impl<P: CompletionProvider> SqlOrchestrator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            ambient_credential: None,
            output_language: DEFAULT_OUTPUT_LANGUAGE.to_string(),
        }
    }

    /// Credential used when a request carries none of its own
    pub fn with_ambient_credential(mut self, credential: Option<String>) -> Self {
        self.ambient_credential = credential.filter(|c| !c.trim().is_empty());
        self
    }

    /// Language for explanation, tips and notes
    pub fn with_output_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        if !language.trim().is_empty() {
            self.output_language = language;
        }
        self
    }

    pub fn output_language(&self) -> &str {
        &self.output_language
    }

    /// Explicit non-blank credential first, then the ambient one
    fn resolve_credential(&self, request: &ProcessingRequest) -> SqlArchResult<String> {
        request
            .credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .or_else(|| self.ambient_credential.clone())
            .ok_or_else(|| {
                SqlArchError::credential_missing(
                    "No API key available. Pass --api-key, set SQLARCH_API_KEY, or add \"api_key\" to the config file",
                )
            })
    }

    /// Build the provider call for a request without sending it
    pub fn build_generation_request(
        &self,
        request: &ProcessingRequest,
    ) -> SqlArchResult<GenerationRequest> {
        request.validate()?;
        let api_key = self.resolve_credential(request)?;
        let prompt = prompts::task_prompt(request)?;
        let model = request.model_id.trim().to_string();
        let reasoning = reasoning_depth_for(&model);

        Ok(GenerationRequest {
            system_instruction: prompts::system_instruction(&self.output_language),
            prompt,
            response_schema: Some(processing_response_schema()),
            reasoning,
            api_key,
            model,
        })
    }

    /// Run one request end to end
    #[instrument(skip(self, request), fields(mode = %request.mode, model = %request.model_id))]
    pub async fn process(&self, request: &ProcessingRequest) -> SqlArchResult<ProcessingResult> {
        let generation = self.build_generation_request(request)?;
        debug!(
            reasoning = ?generation.reasoning,
            prompt_len = generation.prompt.len(),
            "Sending generation request"
        );

        let response = self.provider.generate(&generation).await.map_err(|e| {
            warn!(code = e.error_code(), "Provider call failed: {}", e);
            e
        })?;

        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Provider usage"
            );
        }

        let payload = parse_payload(&response.text).map_err(|e| {
            warn!("Provider answer could not be used: {}", e);
            e
        })?;

        let result = assemble_result(request, payload);
        info!(
            notes = result.relevant_notes(request.mode).len(),
            "Request processed"
        );
        Ok(result)
    }
}

impl SqlOrchestrator<GeminiProvider> {
    /// Orchestrator over the Gemini REST API using a loaded configuration
    pub fn from_config(loaded: &LoadedConfig) -> SqlArchResult<Self> {
        let provider = GeminiProvider::from_config(&loaded.config)?;
        Ok(Self::new(provider)
            .with_ambient_credential(loaded.credential.value().map(str::to_string))
            .with_output_language(loaded.config.output_language.clone()))
    }
}

/// Only the list that belongs to the request's mode is kept
fn assemble_result(request: &ProcessingRequest, payload: ProcessedPayload) -> ProcessingResult {
    let (optimization_tips, conversion_notes) = match request.mode {
        Mode::Optimize => (payload.optimization_tips, Vec::new()),
        Mode::Convert => (Vec::new(), payload.conversion_notes),
    };

    ProcessingResult {
        original_sql: request.sql_text.clone(),
        processed_sql: payload.processed_sql,
        explanation: payload.explanation,
        optimization_tips,
        conversion_notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReasoningDepth;
    use crate::llm::{GenerationResponse, MockCompletionProvider};
    use crate::types::Dialect;

    const OPTIMIZE_ANSWER: &str = r#"{
        "processedSql": "SELECT id, name FROM users WHERE active = true",
        "explanation": "Listed the needed columns instead of SELECT *",
        "optimizationTips": ["Add an index on users(active)"],
        "conversionNotes": ["should be dropped"]
    }"#;

    const CONVERT_ANSWER: &str = r#"{
        "processedSql": "SELECT NOW()",
        "explanation": "SYSDATE maps to NOW()",
        "optimizationTips": ["should be dropped"],
        "conversionNotes": ["DUAL is not needed in MySQL"]
    }"#;

    fn answering(text: &'static str) -> MockCompletionProvider {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_generate()
            .times(1)
            .returning(move |_| Ok(GenerationResponse::new(text)));
        provider
    }

    fn failing(error: SqlArchError) -> MockCompletionProvider {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_generate()
            .times(1)
            .returning(move |_| Err(error.clone()));
        provider
    }

    fn untouched() -> MockCompletionProvider {
        let mut provider = MockCompletionProvider::new();
        provider.expect_generate().never();
        provider
    }

    #[tokio::test]
    async fn test_optimize_success() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_generate()
            .withf(|request| {
                request.model == "gemini-3-flash-preview"
                    && request.api_key == "test-key-123456"
                    && request.reasoning == ReasoningDepth::Disabled
                    && request.response_schema.is_some()
                    && request.prompt.contains("PostgreSQL")
                    && request.system_instruction.contains("Traditional Chinese")
            })
            .times(1)
            .returning(|_| Ok(GenerationResponse::new(OPTIMIZE_ANSWER)));

        let orchestrator = SqlOrchestrator::new(provider);
        let request = ProcessingRequest::optimize(
            "SELECT * FROM users WHERE active = true",
            Dialect::PostgreSql,
            "gemini-3-flash-preview",
        )
        .with_credential("test-key-123456");

        let result = orchestrator.process(&request).await.unwrap();
        assert_eq!(result.original_sql, request.sql_text);
        assert_eq!(
            result.processed_sql,
            "SELECT id, name FROM users WHERE active = true"
        );
        assert_eq!(result.optimization_tips, vec!["Add an index on users(active)"]);
        assert!(result.conversion_notes.is_empty());
    }

    #[tokio::test]
    async fn test_convert_success() {
        let orchestrator = SqlOrchestrator::new(answering(CONVERT_ANSWER))
            .with_ambient_credential(Some("ambient-key-123456".to_string()));
        let request = ProcessingRequest::convert(
            "SELECT SYSDATE FROM DUAL",
            Dialect::Oracle,
            Dialect::MySql,
            "gemini-3-flash-preview",
        );

        let result = orchestrator.process(&request).await.unwrap();
        assert_eq!(result.processed_sql, "SELECT NOW()");
        assert_eq!(result.conversion_notes, vec!["DUAL is not needed in MySQL"]);
        assert!(result.optimization_tips.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_never_calls_provider() {
        let orchestrator = SqlOrchestrator::new(untouched());
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::Sqlite, "gemini-2.5-pro");

        let err = orchestrator.process(&request).await.unwrap_err();
        assert!(matches!(err, SqlArchError::CredentialMissing { .. }));
        assert_eq!(err.error_code(), "SQLARCH_CREDENTIAL_MISSING");
    }

    #[tokio::test]
    async fn test_convert_without_target_never_calls_provider() {
        let orchestrator = SqlOrchestrator::new(untouched())
            .with_ambient_credential(Some("ambient-key-123456".to_string()));
        let mut request =
            ProcessingRequest::convert("SELECT 1", Dialect::Oracle, Dialect::MySql, "m");
        request.target_dialect = None;

        let err = orchestrator.process(&request).await.unwrap_err();
        assert!(matches!(err, SqlArchError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_blank_sql_never_calls_provider() {
        let orchestrator = SqlOrchestrator::new(untouched())
            .with_ambient_credential(Some("ambient-key-123456".to_string()));
        let request = ProcessingRequest::optimize("   ", Dialect::MySql, "m");

        let err = orchestrator.process(&request).await.unwrap_err();
        assert!(matches!(err, SqlArchError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_blank_explicit_credential_uses_ambient() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_generate()
            .withf(|request| request.api_key == "ambient-key-123456")
            .times(1)
            .returning(|_| Ok(GenerationResponse::new(OPTIMIZE_ANSWER)));

        let orchestrator = SqlOrchestrator::new(provider)
            .with_ambient_credential(Some("ambient-key-123456".to_string()));
        let request =
            ProcessingRequest::optimize("SELECT 1", Dialect::MySql, "m").with_credential("  ");

        assert!(orchestrator.process(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_explicit_credential_wins_over_ambient() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_generate()
            .withf(|request| request.api_key == "explicit-key-123456")
            .times(1)
            .returning(|_| Ok(GenerationResponse::new(OPTIMIZE_ANSWER)));

        let orchestrator = SqlOrchestrator::new(provider)
            .with_ambient_credential(Some("ambient-key-123456".to_string()));
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, "m")
            .with_credential("explicit-key-123456");

        assert!(orchestrator.process(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_explanation_is_malformed() {
        let orchestrator = SqlOrchestrator::new(answering(r#"{"processedSql":"SELECT 1"}"#))
            .with_ambient_credential(Some("k".to_string()));
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, "m");

        let err = orchestrator.process(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "SQLARCH_MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_non_json_answer_is_malformed() {
        let orchestrator = SqlOrchestrator::new(answering("I cannot help with that."))
            .with_ambient_credential(Some("k".to_string()));
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, "m");

        let err = orchestrator.process(&request).await.unwrap_err();
        assert!(matches!(err, SqlArchError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_provider_errors_keep_their_kind() {
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, "gemini-2.5-pro");

        let denied = SqlOrchestrator::new(failing(SqlArchError::authorization_denied_for_model(
            "Permission denied",
            "gemini-2.5-pro",
        )))
        .with_ambient_credential(Some("k".to_string()));
        let denied_err = denied.process(&request).await.unwrap_err();

        let limited = SqlOrchestrator::new(failing(SqlArchError::rate_limited("Quota exceeded")))
            .with_ambient_credential(Some("k".to_string()));
        let limited_err = limited.process(&request).await.unwrap_err();

        assert_eq!(denied_err.error_code(), "SQLARCH_AUTHORIZATION_DENIED");
        assert_eq!(limited_err.error_code(), "SQLARCH_RATE_LIMITED");
        assert!(limited_err.is_retryable());
        assert!(!denied_err.is_retryable());
    }

    #[tokio::test]
    async fn test_unknown_model_uses_provider_default_reasoning() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_generate()
            .withf(|request| {
                request.model == "some-future-model"
                    && request.reasoning == ReasoningDepth::ProviderDefault
            })
            .times(1)
            .returning(|_| Ok(GenerationResponse::new(OPTIMIZE_ANSWER)));

        let orchestrator =
            SqlOrchestrator::new(provider).with_ambient_credential(Some("k".to_string()));
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, " some-future-model ");

        assert!(orchestrator.process(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_null_tips_become_empty() {
        let orchestrator = SqlOrchestrator::new(answering(
            r#"{"processedSql":"SELECT 1","explanation":"ok","optimizationTips":null}"#,
        ))
        .with_ambient_credential(Some("k".to_string()));
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, "m");

        let result = orchestrator.process(&request).await.unwrap();
        assert!(result.optimization_tips.is_empty());
    }

    #[test]
    fn test_output_language_override() {
        let orchestrator = SqlOrchestrator::new(untouched())
            .with_output_language("English")
            .with_ambient_credential(Some("k".to_string()));
        let request = ProcessingRequest::optimize("SELECT 1", Dialect::MySql, "m");

        let generation = orchestrator.build_generation_request(&request).unwrap();
        assert!(generation.system_instruction.contains("written in English"));

        let blank = SqlOrchestrator::new(untouched()).with_output_language("  ");
        assert_eq!(blank.output_language(), DEFAULT_OUTPUT_LANGUAGE);
    }
}
