//! Known models and how each one is configured
//!
//! Fast models run with the thinking budget turned off to keep latency low.
//! Everything else, including ids not listed here, is sent with the
//! provider's default reasoning depth.

use serde::Serialize;
use std::fmt;

/// Model used when neither the caller nor the config names one
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Latency/quality tier of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Fast,
    Deep,
}

impl ModelTier {
    /// Short engine label shown next to a model
    pub fn engine_label(&self) -> &'static str {
        match self {
            Self::Fast => "Flash",
            Self::Deep => "Pro",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.engine_label())
    }
}

/// How much internal reasoning the provider may spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningDepth {
    /// Leave the provider's own default in place
    ProviderDefault,
    /// Thinking budget of zero
    Disabled,
}

/// One entry of the model table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub tier: ModelTier,
    pub reasoning: ReasoningDepth,
}

const MODEL_TABLE: &[ModelProfile] = &[
    ModelProfile {
        id: "gemini-3-flash-preview",
        display_name: "Gemini 3 Flash",
        description: "Fast responses for everyday optimization and conversion",
        tier: ModelTier::Fast,
        reasoning: ReasoningDepth::Disabled,
    },
    ModelProfile {
        id: "gemini-3-pro-preview",
        display_name: "Gemini 3 Pro",
        description: "Deep reasoning for complex schemas and very long SQL",
        tier: ModelTier::Deep,
        reasoning: ReasoningDepth::ProviderDefault,
    },
    ModelProfile {
        id: "gemini-2.5-flash",
        display_name: "Gemini 2.5 Flash",
        description: "Previous-generation fast model",
        tier: ModelTier::Fast,
        reasoning: ReasoningDepth::Disabled,
    },
    ModelProfile {
        id: "gemini-2.5-flash-lite",
        display_name: "Gemini 2.5 Flash-Lite",
        description: "Lowest latency and cost, best for short statements",
        tier: ModelTier::Fast,
        reasoning: ReasoningDepth::Disabled,
    },
    ModelProfile {
        id: "gemini-2.5-pro",
        display_name: "Gemini 2.5 Pro",
        description: "Previous-generation deep reasoning model",
        tier: ModelTier::Deep,
        reasoning: ReasoningDepth::ProviderDefault,
    },
];

/// All catalogued models, in menu order
pub fn known_models() -> &'static [ModelProfile] {
    MODEL_TABLE
}

/// Look up a catalogued model by exact id
pub fn find_model(model_id: &str) -> Option<&'static ModelProfile> {
    MODEL_TABLE.iter().find(|profile| profile.id == model_id.trim())
}

/// Reasoning depth to request for `model_id`
pub fn reasoning_depth_for(model_id: &str) -> ReasoningDepth {
    find_model(model_id)
        .map(|profile| profile.reasoning)
        .unwrap_or(ReasoningDepth::ProviderDefault)
}

/// Tier of `model_id`; unknown models are treated as deep
pub fn tier_for(model_id: &str) -> ModelTier {
    find_model(model_id)
        .map(|profile| profile.tier)
        .unwrap_or(ModelTier::Deep)
}
