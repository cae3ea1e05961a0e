//! LLM transport: the provider seam, wire-neutral request types and the
//! structured output schema.

pub mod provider;
pub mod providers;
pub mod schema;
pub mod types;

#[cfg(test)]
pub use provider::MockCompletionProvider;
pub use provider::CompletionProvider;
pub use providers::GeminiProvider;
pub use schema::processing_response_schema;
pub use types::{GenerationRequest, GenerationResponse, TokenUsage};
