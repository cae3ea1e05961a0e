//! HTTP timeout configuration for provider calls

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default connection timeout for the provider API (30 seconds)
pub const CONNECTION_SECS: u64 = 30;

/// Default request timeout for the provider API (120 seconds).
///
/// Deep-reasoning models routinely take over a minute on long statements.
pub const REQUEST_SECS: u64 = 120;

/// Timeouts applied to the shared HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: CONNECTION_SECS,
            request_timeout_secs: REQUEST_SECS,
        }
    }
}

impl TimeoutConfig {
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
