//! Tolerant JSON extraction for model output.
//!
//! The analysis prompt asks the model for a bare JSON object, but models
//! sometimes wrap it in prose or a markdown fence. Parsing is attempted on
//! the whole text first, then on the span from the first `{` to the last `}`.
//! The fallback is greedy and does not track nesting or string literals, so
//! text holding several independent objects will usually fail to parse.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no valid JSON object found")]
    NoObject,
    #[error("no valid JSON object found: {0}")]
    Malformed(String),
}

/// Parse `text` as JSON, falling back to the outermost brace span.
pub fn extract_json(text: &str) -> Result<Value, ExtractionError> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(ExtractionError::NoObject);
    };
    if end < start {
        return Err(ExtractionError::NoObject);
    }

    serde_json::from_str(&text[start..=end])
        .map_err(|e| ExtractionError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_parse_matches_serde() {
        let inputs = [
            r#"{"a": {"b": 1}}"#,
            r#"[1, 2, 3]"#,
            r#""just a string""#,
            "42",
            "  {\"padded\": true}\n",
        ];
        for input in inputs {
            let expected: Value = serde_json::from_str(input).unwrap();
            assert_eq!(extract_json(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn nested_object_takes_strict_path() {
        assert_eq!(
            extract_json(r#"{"a": {"b": 1}}"#).unwrap(),
            json!({"a": {"b": 1}})
        );
    }

    #[test]
    fn fenced_object_is_recovered() {
        let text = "```json\n{\"a\":1}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn prose_prefix_is_skipped() {
        let text = r#"Here is your report: {"summary":"ok","severity":5}"#;
        assert_eq!(
            extract_json(text).unwrap(),
            json!({"summary": "ok", "severity": 5})
        );
    }

    #[test]
    fn prose_on_both_sides_is_skipped() {
        let text = "Sure.\n{\"pathways\": [{\"name\": \"Quick Win\"}]}\nLet me know if you need more.";
        assert_eq!(
            extract_json(text).unwrap(),
            json!({"pathways": [{"name": "Quick Win"}]})
        );
    }

    #[test]
    fn text_without_braces_fails() {
        assert_eq!(extract_json("no json here"), Err(ExtractionError::NoObject));
    }

    #[test]
    fn closing_brace_before_opening_fails() {
        assert_eq!(extract_json("} oops {"), Err(ExtractionError::NoObject));
    }

    #[test]
    fn only_opening_brace_fails() {
        assert_eq!(extract_json("{ never closed"), Err(ExtractionError::NoObject));
    }

    #[test]
    fn invalid_content_inside_braces_fails() {
        let err = extract_json("report: {summary: ok, } trailing").unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn two_independent_objects_fail_greedy_span() {
        let err = extract_json(r#"first {"a":1} then {"b":2}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn repeated_extraction_is_stable() {
        let inputs = [
            r#"prefix {"x": [1, 2]} suffix"#,
            "no json here",
            r#"{"ok": true}"#,
        ];
        for input in inputs {
            assert_eq!(extract_json(input), extract_json(input));
        }
    }
}
