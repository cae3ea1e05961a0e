//! Google (Gemini) provider implementation

use super::error_utils::{ProviderErrorBody, parse_provider_error_body};
use crate::config::{Config, ReasoningDepth};
use crate::error::{SqlArchError, SqlArchResult};
use crate::llm::provider::CompletionProvider;
use crate::llm::types::{GenerationRequest, GenerationResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

// Gemini API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    /// Thought summaries are not part of the answer
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    thoughts_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

/// Google (Gemini) provider handler
pub struct GeminiProvider {
    base_url: String,
    http_client: Client,
}

impl GeminiProvider {
    /// Create a provider over an existing HTTP client
    pub fn new(base_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Create a provider with an HTTP client built from `config`
    pub fn from_config(config: &Config) -> SqlArchResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.timeouts.connection_timeout())
            .timeout(config.timeouts.request_timeout())
            .build()
            .map_err(|e| SqlArchError::config(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created Gemini client with timeouts: connection={}s, request={}s",
            config.timeouts.connect_timeout_secs, config.timeouts.request_timeout_secs
        );

        Ok(Self::new(config.trimmed_base_url(), http_client))
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model.trim()
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model), level = "debug")]
    async fn generate(&self, request: &GenerationRequest) -> SqlArchResult<GenerationResponse> {
        let body = build_request_body(request);

        let response = self
            .http_client
            .post(self.endpoint(&request.model))
            .header(API_KEY_HEADER, &request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                SqlArchError::from(e).with_context(format!(
                    "Sending generateContent request for model {}",
                    request.model
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!("Failed to read Gemini error body: {}", e.without_url());
                    String::new()
                }
            };
            let error = classify_error_response(status, &error_text, &request.model);
            warn!("Gemini API error (status {}): {}", status, error);
            return Err(error);
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                SqlArchError::malformed_response(format!(
                    "Failed to parse Gemini response: {}",
                    e.without_url()
                ))
            } else {
                SqlArchError::from(e)
            }
        })?;

        let generated = extract_generation(payload)?;
        if let Some(usage) = &generated.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                thinking_tokens = usage.thinking_tokens,
                "Gemini usage"
            );
        }
        Ok(generated)
    }
}

/// Translate a provider-neutral request into the Gemini wire shape
pub(crate) fn build_request_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    let thinking_config = match request.reasoning {
        ReasoningDepth::Disabled => Some(ThinkingConfig { thinking_budget: 0 }),
        ReasoningDepth::ProviderDefault => None,
    };

    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: &request.system_instruction,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: request.response_schema.as_ref().map(|_| JSON_MIME_TYPE),
            response_schema: request.response_schema.as_ref(),
            thinking_config,
        },
    }
}

/// Map a non-success status to an error kind.
///
/// Routing is on the HTTP status and the RPC `ErrorInfo.reason`; the message
/// text is only carried along for display.
pub fn classify_error_response(status: StatusCode, body: &str, model: &str) -> SqlArchError {
    let ProviderErrorBody {
        message,
        status: rpc_status,
        reason,
    } = parse_provider_error_body(body);

    let key_rejected = reason.as_deref() == Some("API_KEY_INVALID")
        || message.to_ascii_lowercase().contains("api key not valid");

    let error = match status {
        StatusCode::UNAUTHORIZED => SqlArchError::invalid_credential(message),
        StatusCode::BAD_REQUEST if key_rejected => SqlArchError::invalid_credential(message),
        StatusCode::FORBIDDEN => SqlArchError::authorization_denied_for_model(message, model),
        StatusCode::TOO_MANY_REQUESTS => SqlArchError::rate_limited(message),
        other => SqlArchError::provider(message, other.as_u16()),
    };

    match rpc_status {
        Some(rpc_status) => error.with_context(format!("RPC status {}", rpc_status)),
        None => error,
    }
}

/// Pull the answer text out of a successful response
pub(crate) fn extract_generation(
    response: GenerateContentResponse,
) -> SqlArchResult<GenerationResponse> {
    let usage = response.usage_metadata.map(|u| TokenUsage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens: u.candidates_token_count,
        thinking_tokens: u.thoughts_token_count,
        total_tokens: u.total_token_count,
    });

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("prompt was blocked ({})", reason))
            .unwrap_or_else(|| "no candidates in response".to_string());
        return Err(SqlArchError::malformed_response(reason));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .as_deref()
            .unwrap_or("UNKNOWN")
            .to_string();
        return Err(SqlArchError::malformed_response(format!(
            "empty response text (finish reason {})",
            reason
        )));
    }

    Ok(GenerationResponse {
        text,
        model_version: response.model_version,
        finish_reason: candidate.finish_reason,
        usage,
    })
}
