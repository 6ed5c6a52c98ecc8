//! Content file validation
//!
//! Stricter than the reader: every item must carry `text`, and `date` must be
//! a real `YYYY-MM-DD` calendar day. Used by `line-check` before a file is
//! handed to the scheduled poster.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::content::json_type_name;

/// One problem found in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemIssue {
    /// 1-based item position, `None` for file-level issues
    pub item: Option<usize>,
    pub message: String,
}

impl ItemIssue {
    fn file(message: impl Into<String>) -> Self {
        Self {
            item: None,
            message: message.into(),
        }
    }

    fn item(index: usize, message: impl Into<String>) -> Self {
        Self {
            item: Some(index + 1),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ItemIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.item {
            Some(n) => write!(f, "item {}: {}", n, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub item_count: usize,
    pub errors: Vec<ItemIssue>,
    /// Non-blocking findings
    pub warnings: Vec<ItemIssue>,
}

impl ValidationReport {
    fn failed(error: ItemIssue) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            ..Default::default()
        }
    }
}

/// Validate the content file at `path`
pub fn validate_file(path: &Path) -> ValidationReport {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return ValidationReport::failed(ItemIssue::file(format!(
                "{} not found",
                path.display()
            )))
        }
        Err(e) => {
            return ValidationReport::failed(ItemIssue::file(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => validate_value(&value),
        Err(e) => ValidationReport::failed(ItemIssue::file(format!(
            "failed to parse {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Validate already parsed content
pub fn validate_value(value: &Value) -> ValidationReport {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return ValidationReport::failed(ItemIssue::file(format!(
                "content must be a JSON array, found {}",
                json_type_name(other)
            )))
        }
    };

    if items.is_empty() {
        return ValidationReport::failed(ItemIssue::file("content contains no posts"));
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (i, item) in items.iter().enumerate() {
        let object = match item.as_object() {
            Some(object) => object,
            None => {
                errors.push(ItemIssue::item(
                    i,
                    format!("must be an object, found {}", json_type_name(item)),
                ));
                continue;
            }
        };

        match object.get("text") {
            Some(Value::String(_)) => {}
            Some(other) => errors.push(ItemIssue::item(
                i,
                format!("'text' must be a string, found {}", json_type_name(other)),
            )),
            None => errors.push(ItemIssue::item(i, "missing 'text' field")),
        }

        match object.get("image_url") {
            None => {}
            Some(Value::String(url)) if !url.starts_with("https://") => warnings.push(
                ItemIssue::item(i, format!("image_url should be an https URL: {}", url)),
            ),
            Some(Value::String(_)) => {}
            Some(other) => errors.push(ItemIssue::item(
                i,
                format!("'image_url' must be a string, found {}", json_type_name(other)),
            )),
        }

        match object.get("date") {
            None => {}
            Some(Value::String(date)) if is_valid_date(date) => {
                if let Some(first) = first_seen.get(date.as_str()) {
                    warnings.push(ItemIssue::item(
                        i,
                        format!(
                            "date {} already used by item {}; only the first is ever posted",
                            date,
                            first + 1
                        ),
                    ));
                } else {
                    first_seen.insert(date.as_str(), i);
                }
            }
            Some(other) => errors.push(ItemIssue::item(
                i,
                format!(
                    "invalid date {}; dates must be in 'YYYY-MM-DD' format",
                    other
                ),
            )),
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        item_count: items.len(),
        errors,
        warnings,
    }
}

/// `YYYY-MM-DD` and an existing calendar day
fn is_valid_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_valid_content() {
        let report = validate_value(&json!([
            {"text": "A", "date": "2024-03-01"},
            {"text": "B", "image_url": "https://example.com/b.png"},
            {"text": "C"}
        ]));

        assert!(report.valid);
        assert_eq!(report.item_count, 3);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_top_level_must_be_array() {
        let report = validate_value(&json!({"text": "A"}));
        assert!(!report.valid);
        assert_eq!(report.errors[0].item, None);
        assert!(report.errors[0].message.contains("must be a JSON array"));
    }

    #[test]
    fn test_empty_array_is_invalid() {
        let report = validate_value(&json!([]));
        assert!(!report.valid);
        assert!(report.errors[0].message.contains("no posts"));
    }

    #[test]
    fn test_items_must_be_objects_with_text() {
        let report = validate_value(&json!([
            "just a string",
            {"image_url": "https://example.com/a.png"},
            {"text": 7}
        ]));

        assert!(!report.valid);
        let rendered: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "item 1: must be an object, found a string",
                "item 2: missing 'text' field",
                "item 3: 'text' must be a string, found a number",
            ]
        );
    }

    #[test]
    fn test_date_format_checked() {
        let report = validate_value(&json!([
            {"text": "A", "date": "2024/03/01"},
            {"text": "B", "date": "2024-02-30"},
            {"text": "C", "date": 20240301},
            {"text": "D", "date": "2024-02-29"}
        ]));

        assert!(!report.valid);
        let items: Vec<Option<usize>> = report.errors.iter().map(|e| e.item).collect();
        assert_eq!(items, vec![Some(1), Some(2), Some(3)]);
        assert!(report.errors[0].message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_duplicate_dates_warn() {
        let report = validate_value(&json!([
            {"text": "A", "date": "2024-12-25"},
            {"text": "B", "date": "2024-12-25"}
        ]));

        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].item, Some(2));
        assert!(report.warnings[0].message.contains("item 1"));
    }

    #[test]
    fn test_plain_http_image_warns() {
        let report = validate_value(&json!([
            {"text": "A", "image_url": "http://example.com/a.png"}
        ]));

        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_validate_file_missing_and_malformed() {
        let dir = TempDir::new().unwrap();

        let missing = validate_file(&dir.path().join("content.json"));
        assert!(!missing.valid);
        assert!(missing.errors[0].message.contains("not found"));

        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        let malformed = validate_file(&path);
        assert!(!malformed.valid);
        assert!(malformed.errors[0].message.contains("failed to parse"));
    }

    #[test]
    fn test_validate_file_ok() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        fs::write(&path, r#"[{"text": "hello"}]"#).unwrap();

        let report = validate_file(&path);
        assert!(report.valid);
        assert_eq!(report.item_count, 1);
    }
}
