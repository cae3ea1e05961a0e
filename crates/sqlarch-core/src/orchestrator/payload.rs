//! Deserialization of the model's structured answer
//!
//! Optional lists are default-filled here, at the boundary, so nothing
//! downstream has to handle absent or null tips and notes.

use crate::error::{SqlArchError, SqlArchResult};
use crate::llm::schema::{FIELD_EXPLANATION, FIELD_PROCESSED_SQL};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    processed_sql: Option<String>,
    explanation: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    optimization_tips: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    conversion_notes: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A payload with both required fields present and non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedPayload {
    pub processed_sql: String,
    pub explanation: String,
    pub optimization_tips: Vec<String>,
    pub conversion_notes: Vec<String>,
}

/// Parse and validate the model's answer text
pub fn parse_payload(text: &str) -> SqlArchResult<ProcessedPayload> {
    let json = strip_code_fence(text);

    let raw: RawPayload = serde_json::from_str(json).map_err(|e| {
        SqlArchError::malformed_response(format!("response is not the expected JSON shape: {}", e))
    })?;

    let processed_sql = require(raw.processed_sql, FIELD_PROCESSED_SQL)?;
    let explanation = require(raw.explanation, FIELD_EXPLANATION)?;

    Ok(ProcessedPayload {
        processed_sql,
        explanation,
        optimization_tips: clean_list(raw.optimization_tips),
        conversion_notes: clean_list(raw.conversion_notes),
    })
}

fn require(value: Option<String>, field: &str) -> SqlArchResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(SqlArchError::malformed_response(format!(
            "required field '{}' is empty",
            field
        ))),
        None => Err(SqlArchError::malformed_response(format!(
            "missing required field '{}'",
            field
        ))),
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Some models wrap JSON in a markdown fence even in JSON mode
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let payload = parse_payload(
            r#"{"processedSql":"SELECT id FROM t","explanation":"Avoid SELECT *","optimizationTips":["Index t(id)"],"conversionNotes":[]}"#,
        )
        .unwrap();
        assert_eq!(payload.processed_sql, "SELECT id FROM t");
        assert_eq!(payload.optimization_tips, vec!["Index t(id)"]);
        assert!(payload.conversion_notes.is_empty());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let payload =
            parse_payload(r#"{"processedSql":"SELECT 1","explanation":"trivial"}"#).unwrap();
        assert!(payload.optimization_tips.is_empty());
        assert!(payload.conversion_notes.is_empty());
    }

    #[test]
    fn test_null_lists_default_to_empty() {
        let payload = parse_payload(
            r#"{"processedSql":"SELECT 1","explanation":"x","optimizationTips":null,"conversionNotes":null}"#,
        )
        .unwrap();
        assert!(payload.optimization_tips.is_empty());
        assert!(payload.conversion_notes.is_empty());
    }

    #[test]
    fn test_missing_explanation_is_malformed() {
        let err = parse_payload(r#"{"processedSql":"SELECT 1"}"#).unwrap_err();
        assert!(matches!(err, SqlArchError::MalformedResponse { .. }));
        assert!(err.to_string().contains("explanation"));
    }

    #[test]
    fn test_blank_processed_sql_is_malformed() {
        let err = parse_payload(r#"{"processedSql":"  ","explanation":"x"}"#).unwrap_err();
        assert!(err.to_string().contains("processedSql"));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = parse_payload("Sure! Here is your query: SELECT 1").unwrap_err();
        assert!(matches!(err, SqlArchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_wrong_list_type_is_malformed() {
        let err = parse_payload(r#"{"processedSql":"a","explanation":"b","optimizationTips":"x"}"#)
            .unwrap_err();
        assert!(matches!(err, SqlArchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_fenced_json() {
        let payload =
            parse_payload("```json\n{\"processedSql\":\"SELECT 1\",\"explanation\":\"x\"}\n```")
                .unwrap();
        assert_eq!(payload.processed_sql, "SELECT 1");
    }

    #[test]
    fn test_blank_list_items_dropped() {
        let payload = parse_payload(
            r#"{"processedSql":"a","explanation":"b","conversionNotes":["  ","NOW() replaces SYSDATE "]}"#,
        )
        .unwrap();
        assert_eq!(payload.conversion_notes, vec!["NOW() replaces SYSDATE"]);
    }
}
