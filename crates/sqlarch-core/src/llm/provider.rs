//! Provider trait

use super::types::{GenerationRequest, GenerationResponse};
use crate::error::SqlArchResult;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// A text generation backend.
///
/// Implementations make exactly one outbound call per `generate` and never
/// retry; status handling maps provider failures onto `SqlArchError` kinds.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one generation call
    async fn generate(&self, request: &GenerationRequest) -> SqlArchResult<GenerationResponse>;
}
