//! SQL Architect Core Library
//!
//! This crate provides the core functionality of SQL Architect: dialect and
//! request types, configuration and credential resolution, the Gemini
//! provider, and the orchestrator that optimizes or converts SQL in a single
//! structured generation call.

pub mod config;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod types;

// Re-export commonly used types
pub use config::{CliOverrides, Config, ConfigLoader, LoadedConfig, ModelProfile, ReasoningDepth};
pub use error::{ErrorCategory, SqlArchError, SqlArchResult, UnifiedError, UserFriendlyError};
pub use llm::{CompletionProvider, GeminiProvider, GenerationRequest, GenerationResponse};
pub use orchestrator::SqlOrchestrator;
pub use types::*;
