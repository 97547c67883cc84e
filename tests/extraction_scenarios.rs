use brunel_engine::extract::{ExtractionError, extract_json};
use serde_json::json;

#[test]
fn report_after_prose_prefix() {
    let value = extract_json(r#"Here is your report: {"summary":"ok","severity":5}"#).unwrap();
    assert_eq!(value, json!({"summary": "ok", "severity": 5}));
}

#[test]
fn nested_object_parses_directly() {
    let value = extract_json(r#"{"a": {"b": 1}}"#).unwrap();
    assert_eq!(value, json!({"a": {"b": 1}}));
}

#[test]
fn plain_text_is_rejected() {
    let err = extract_json("no json here").unwrap_err();
    assert_eq!(err, ExtractionError::NoObject);
    assert_eq!(err.to_string(), "no valid JSON object found");
}

#[test]
fn full_report_in_markdown_fence() {
    let text = r#"```json
{
  "summary": "Commute eats two hours a day.",
  "core_issue": "Housing near work is unaffordable.",
  "severity": 7,
  "commitment": "considering",
  "constraints": ["budget", "school catchment"],
  "pathways": [
    {"name": "Quick Win", "effort": "low", "impact": "medium", "timeframe": "This week"}
  ],
  "next_actions": ["Ask manager about two remote days"],
  "tools": [],
  "pattern": "Systemic: regional housing costs."
}
```"#;
    let value = extract_json(text).unwrap();
    assert_eq!(value["severity"], 7);
    assert_eq!(value["constraints"], json!(["budget", "school catchment"]));
    assert_eq!(value["pathways"][0]["name"], "Quick Win");
}

#[test]
fn braces_inside_strings_survive_greedy_span() {
    let text = r#"Report: {"summary": "uses {curly} braces", "severity": 2} done"#;
    let value = extract_json(text).unwrap();
    assert_eq!(value["summary"], "uses {curly} braces");
}

#[test]
fn garbage_between_braces_is_rejected() {
    let err = extract_json("prefix { not: valid, json } suffix").unwrap_err();
    assert!(matches!(err, ExtractionError::Malformed(_)));
}
