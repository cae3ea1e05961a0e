//! Structured output schema for SQL processing answers
//!
//! Written in the OpenAPI subset that Gemini's `responseSchema` accepts.

use serde_json::{Value, json};

pub const FIELD_PROCESSED_SQL: &str = "processedSql";
pub const FIELD_EXPLANATION: &str = "explanation";
pub const FIELD_OPTIMIZATION_TIPS: &str = "optimizationTips";
pub const FIELD_CONVERSION_NOTES: &str = "conversionNotes";

/// Schema of the payload the model must return
pub fn processing_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            FIELD_PROCESSED_SQL: { "type": "STRING" },
            FIELD_EXPLANATION: { "type": "STRING" },
            FIELD_OPTIMIZATION_TIPS: {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            FIELD_CONVERSION_NOTES: {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": [FIELD_PROCESSED_SQL, FIELD_EXPLANATION]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let schema = processing_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["processedSql", "explanation"]);
    }

    #[test]
    fn test_list_fields_are_string_arrays() {
        let schema = processing_response_schema();
        for field in [FIELD_OPTIMIZATION_TIPS, FIELD_CONVERSION_NOTES] {
            assert_eq!(schema["properties"][field]["type"], "ARRAY");
            assert_eq!(schema["properties"][field]["items"]["type"], "STRING");
        }
    }
}
