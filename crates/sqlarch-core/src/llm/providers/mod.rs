//! Provider-specific implementations

pub mod error_utils;
pub mod google;

pub use google::GeminiProvider;
