use super::Mode;
use serde::{Deserialize, Serialize};

/// Normalized outcome of one successful call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub original_sql: String,
    pub processed_sql: String,
    pub explanation: String,
    /// Only populated for `Mode::Optimize`
    pub optimization_tips: Vec<String>,
    /// Only populated for `Mode::Convert`
    pub conversion_notes: Vec<String>,
}

impl ProcessingResult {
    /// The list that matters for the given mode
    pub fn relevant_notes(&self, mode: Mode) -> &[String] {
        match mode {
            Mode::Optimize => &self.optimization_tips,
            Mode::Convert => &self.conversion_notes,
        }
    }
}
