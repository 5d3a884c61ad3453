use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use wl_core::{WorklogEntry, is_task_key};

use crate::error::ParseError;

static FENCED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("valid regex"));
static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Locates and decodes the JSON array in raw model output.
///
/// Search order: a fenced code block first (models add them despite the
/// contract), then any bracket-delimited substring. One invalid element
/// fails the whole extraction; a silently shortened batch would produce
/// incomplete logs the user has no way to notice.
pub fn extract_entries(raw: &str) -> Result<Vec<WorklogEntry>, ParseError> {
    let payload = locate_array(raw).ok_or(ParseError::MalformedResponse)?;

    let values: Vec<Value> =
        serde_json::from_str(payload).map_err(|_| ParseError::MalformedResponse)?;

    values.iter().map(validate_entry).collect()
}

fn locate_array(raw: &str) -> Option<&str> {
    if let Some(captures) = FENCED_RE.captures(raw) {
        let inner = captures.get(1).map(|m| m.as_str())?;
        // A fenced block may wrap prose; only take it when it holds the array.
        if let Some(found) = ARRAY_RE.find(inner) {
            return Some(found.as_str());
        }
    }
    ARRAY_RE.find(raw).map(|m| m.as_str())
}

/// Validates one decoded element against the structural contract.
pub fn validate_entry(raw: &Value) -> Result<WorklogEntry, ParseError> {
    let activity = match raw.get("activity").and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => return Err(ParseError::InvalidActivity),
    };

    let task = match raw.get("task") {
        None | Some(Value::Null) => None,
        // The model sometimes emits the literal string "null".
        Some(Value::String(s)) if s == "null" => None,
        Some(Value::String(s)) if is_task_key(s) => Some(s.clone()),
        Some(other) => return Err(ParseError::InvalidTask(other.to_string())),
    };

    let hours = match raw.get("hours").and_then(Value::as_f64) {
        Some(h) if h > 0.0 && h <= 24.0 => h,
        _ => {
            return Err(ParseError::InvalidHours(
                raw.get("hours").map(Value::to_string).unwrap_or_else(|| "missing".into()),
            ));
        }
    };

    let date = match raw.get("date").and_then(Value::as_str) {
        Some(s) if DATE_RE.is_match(s) => s.to_string(),
        _ => {
            return Err(ParseError::InvalidDate(
                raw.get("date").map(Value::to_string).unwrap_or_else(|| "missing".into()),
            ));
        }
    };

    Ok(WorklogEntry {
        task,
        activity,
        hours,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let entries = extract_entries(
            r#"[{"activity":"разработка","task":"PROJ-1","hours":3,"date":"2025-06-05"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].task.as_deref(), Some("PROJ-1"));
        assert_eq!(entries[0].hours, 3.0);
    }

    #[test]
    fn test_fenced_block() {
        let raw = "Here you go:\n```json\n[{\"activity\":\"митинг\",\"task\":null,\"hours\":1,\"date\":\"2025-06-06\"}]\n```\nLet me know!";
        let entries = extract_entries(raw).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].task.is_none());
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = "```\n[{\"activity\":\"a\",\"hours\":2,\"date\":\"2025-06-06\"}]\n```";
        assert_eq!(extract_entries(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_array_embedded_in_prose() {
        let raw = r#"Sure! The result is [{"activity":"review","task":"AB-2","hours":2,"date":"2025-06-06"}] as requested."#;
        let entries = extract_entries(raw).unwrap();
        assert_eq!(entries[0].activity, "review");
    }

    #[test]
    fn test_no_array_is_malformed() {
        let err = extract_entries("I could not parse that input, sorry.").unwrap_err();
        assert!(matches!(err, ParseError::MalformedResponse));
    }

    #[test]
    fn test_undecodable_array_is_malformed() {
        let err = extract_entries("[{not json}]").unwrap_err();
        assert!(matches!(err, ParseError::MalformedResponse));
    }

    #[test]
    fn test_non_array_object_is_malformed() {
        // An object decodes, but the contract demands an array.
        let err = extract_entries(r#"{"activity":"a","hours":1,"date":"2025-06-06"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MalformedResponse));
    }

    #[test]
    fn test_empty_array_is_ok_here() {
        // EmptyExtraction is the port's concern, not the extractor's.
        assert!(extract_entries("[]").unwrap().is_empty());
    }

    #[test]
    fn test_one_bad_element_poisons_batch() {
        let raw = r#"[
            {"activity":"good","task":"PROJ-1","hours":2,"date":"2025-06-05"},
            {"activity":"","task":"PROJ-1","hours":2,"date":"2025-06-05"}
        ]"#;
        let err = extract_entries(raw).unwrap_err();
        assert!(matches!(err, ParseError::InvalidActivity));
    }

    #[test]
    fn test_task_null_normalization() {
        for raw_task in ["null", "missing", "json-null"] {
            let value = match raw_task {
                "null" => json!({"activity":"a","task":"null","hours":1,"date":"2025-06-06"}),
                "json-null" => json!({"activity":"a","task":null,"hours":1,"date":"2025-06-06"}),
                _ => json!({"activity":"a","hours":1,"date":"2025-06-06"}),
            };
            let entry = validate_entry(&value).unwrap();
            assert!(entry.task.is_none(), "task should be absent for {raw_task}");
        }
    }

    #[test]
    fn test_invalid_task_shapes() {
        for bad in [json!("proj-1"), json!("PROJ1"), json!(7)] {
            let value = json!({"activity":"a","task":bad,"hours":1,"date":"2025-06-06"});
            assert!(matches!(
                validate_entry(&value).unwrap_err(),
                ParseError::InvalidTask(_)
            ));
        }
    }

    #[test]
    fn test_hours_boundaries() {
        let entry = |hours: Value| json!({"activity":"a","hours":hours,"date":"2025-06-06"});
        assert!(validate_entry(&entry(json!(24))).is_ok());
        assert!(validate_entry(&entry(json!(0.25))).is_ok());
        for bad in [json!(0), json!(24.0001), json!(-1), json!("3"), Value::Null] {
            assert!(
                matches!(
                    validate_entry(&entry(bad.clone())).unwrap_err(),
                    ParseError::InvalidHours(_)
                ),
                "hours {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_hours_rejected() {
        let value = json!({"activity":"a","date":"2025-06-06"});
        assert!(matches!(
            validate_entry(&value).unwrap_err(),
            ParseError::InvalidHours(_)
        ));
    }

    #[test]
    fn test_date_shape() {
        let entry = |date: Value| json!({"activity":"a","hours":1,"date":date});
        assert!(validate_entry(&entry(json!("2025-06-06"))).is_ok());
        for bad in [json!("06.06.2025"), json!("2025-6-6"), json!(""), Value::Null, json!(20250606)]
        {
            assert!(matches!(
                validate_entry(&entry(bad)).unwrap_err(),
                ParseError::InvalidDate(_)
            ));
        }
    }

    #[test]
    fn test_period_expansion_week_of_workdays() {
        // Canned model output for "last week, calls every day, 1.5 hours"
        // anchored at Friday 2025-06-06: previous Monday through Friday.
        let raw = r#"[
            {"activity":"созвоны","task":null,"hours":1.5,"date":"2025-05-26"},
            {"activity":"созвоны","task":null,"hours":1.5,"date":"2025-05-27"},
            {"activity":"созвоны","task":null,"hours":1.5,"date":"2025-05-28"},
            {"activity":"созвоны","task":null,"hours":1.5,"date":"2025-05-29"},
            {"activity":"созвоны","task":null,"hours":1.5,"date":"2025-05-30"}
        ]"#;
        let entries = extract_entries(raw).unwrap();
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|e| e.hours == 1.5));
        let mut dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        dates.sort_unstable();
        dates.dedup();
        assert_eq!(dates.len(), 5, "no duplicate dates in the expanded period");
    }
}
