//! System instruction and task prompts

use crate::error::{SqlArchError, SqlArchResult};
use crate::types::{Mode, ProcessingRequest};

/// Placeholder used in the optimize prompt when no schema context was given
pub const SCHEMA_NOT_PROVIDED: &str = "not provided";

/// Fixed instructions for the model, parameterized by output language
pub fn system_instruction(output_language: &str) -> String {
    format!(
        "You are a world-class SQL architect and senior DBA.\n\
         Your task is to optimize SQL or convert it between dialects.\n\
         \n\
         Rules:\n\
         1. Preserve semantic integrity.\n\
         2. Follow database-specific best practices (for example: use CTEs, avoid cursors, give correct index recommendations).\n\
         3. Pay special attention to MS Access syntax limits: dates must be wrapped in # signs, and multiple joins usually need nested parentheses.\n\
         4. Return the response in structured JSON format.\n\
         5. All non-code text (explanation, tips, notes) must be written in {}.\n\
         6. Keep answers concise and focused on technical performance.",
        output_language.trim()
    )
}

/// Mode-specific prompt for a validated request
pub fn task_prompt(request: &ProcessingRequest) -> SqlArchResult<String> {
    match request.mode {
        Mode::Optimize => Ok(format!(
            "Optimize the following {} SQL query.\n\
             Schema context: {}\n\
             SQL: {}",
            request.source_dialect.display_name(),
            request.schema_context().unwrap_or(SCHEMA_NOT_PROVIDED),
            request.sql_text
        )),
        Mode::Convert => {
            let target = request.target_dialect.ok_or_else(|| {
                SqlArchError::invalid_input_field(
                    "A target dialect is required when converting",
                    "target_dialect",
                )
            })?;
            Ok(format!(
                "Convert the following SQL from {} to {}.\n\
                 SQL: {}",
                request.source_dialect.display_name(),
                target.display_name(),
                request.sql_text
            ))
        }
    }
}
