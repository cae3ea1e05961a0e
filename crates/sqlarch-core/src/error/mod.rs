//! Error types for SQL Architect
//!
//! Every failure a caller can see is one `SqlArchError` variant. Variants are
//! kept distinct per provider outcome (missing key, denied access, throttling,
//! bad key, unusable payload, transport) so front ends can branch on the kind
//! via `UnifiedError::error_code` instead of parsing message text.

mod constructors;
mod conversions;
mod types;
mod unified_error;
mod user_messages;

pub use types::{SqlArchError, SqlArchResult, UnifiedError};
pub use user_messages::{ErrorCategory, UserFriendlyError};
