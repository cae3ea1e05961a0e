//! Provider-neutral request and response types

use crate::config::ReasoningDepth;
use crate::config::credential::mask_key;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single structured generation call
#[derive(Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    /// When set, the provider must answer with JSON matching this schema
    pub response_schema: Option<Value>,
    pub reasoning: ReasoningDepth,
    pub api_key: String,
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("model", &self.model)
            .field("system_instruction_len", &self.system_instruction.len())
            .field("prompt_len", &self.prompt.len())
            .field("structured", &self.response_schema.is_some())
            .field("reasoning", &self.reasoning)
            .field("api_key", &mask_key(&self.api_key))
            .finish()
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub thinking_tokens: u32,
    pub total_tokens: u32,
}

/// Raw text answer of a generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    /// Concatenated text parts of the first candidate
    pub text: String,
    pub model_version: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl GenerationResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_version: None,
            finish_reason: None,
            usage: None,
        }
    }
}
