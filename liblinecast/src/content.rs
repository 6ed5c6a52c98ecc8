//! Content store reader
//!
//! Reads the candidate posts from a JSON file containing an array of objects.
//! Only the shape is checked here ("an array of key/value records"); field
//! level rules live in [`crate::service::validation`]. A field of the wrong
//! type is read as absent rather than rejecting the file.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ContentError;
use crate::types::PostRecord;

/// Load the content file, never failing
///
/// A missing or malformed file yields an empty collection and a warning.
/// Callers treat an empty result as "nothing to post".
pub fn load(path: &Path) -> Vec<PostRecord> {
    match try_load(path) {
        Ok(records) => records,
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Load the content file, reporting why it could not be read
pub fn try_load(path: &Path) -> Result<Vec<PostRecord>, ContentError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ContentError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(ContentError::Io(e)),
    };

    let records = parse(&raw).map_err(|reason| ContentError::Malformed {
        path: path.display().to_string(),
        reason,
    })?;

    debug!("Loaded {} record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Parse content from a JSON string
pub fn parse(raw: &str) -> Result<Vec<PostRecord>, String> {
    // UTF-8 BOM from editors on Windows
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(format!(
                "expected a JSON array of objects, found {}",
                json_type_name(&other)
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(format!(
                    "item {} is {}, expected an object",
                    i + 1,
                    json_type_name(&item)
                ));
            }
            serde_json::from_value(item).map_err(|e| format!("item {}: {}", i + 1, e))
        })
        .collect()
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_content(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("content.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_records_in_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_content(
            &dir,
            r#"[
                {"date": "2024-03-01", "text": "A"},
                {"text": "B", "image_url": "https://example.com/b.png"}
            ]"#,
        );

        let records = load(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text.as_deref(), Some("A"));
        assert_eq!(records[0].date.as_deref(), Some("2024-03-01"));
        assert_eq!(records[1].image_url.as_deref(), Some("https://example.com/b.png"));
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let records = load(&dir.path().join("missing.json"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_malformed_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_content(&dir, "[{\"text\": \"unterminated\"");
        assert!(load(&path).is_empty());
    }

    #[test]
    fn test_try_load_distinguishes_missing_from_malformed() {
        let dir = TempDir::new().unwrap();

        let missing = try_load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, ContentError::NotFound(_)));

        let path = write_content(&dir, "not json");
        let malformed = try_load(&path).unwrap_err();
        assert!(matches!(malformed, ContentError::Malformed { .. }));
    }

    #[test]
    fn test_top_level_object_is_rejected() {
        let err = parse(r#"{"text": "A"}"#).unwrap_err();
        assert!(err.contains("found an object"));
    }

    #[test]
    fn test_non_object_items_are_rejected() {
        let err = parse(r#"[{"text": "A"}, ["B"]]"#).unwrap_err();
        assert!(err.contains("item 2 is an array"));
    }

    #[test]
    fn test_wrongly_typed_fields_still_load() {
        let records = parse(
            r#"[{"text": "A"}, {"text": "B", "date": 20240301}, {"text": 42, "image_url": "https://example.com/c.png"}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1], PostRecord::text("B"));
        assert!(records[2].text.is_none());
        assert_eq!(records[2].image_url.as_deref(), Some("https://example.com/c.png"));
    }

    #[test]
    fn test_empty_array_is_valid_and_empty() {
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let records = parse("\u{feff}[{\"text\": \"A\"}]").unwrap();
        assert_eq!(records, vec![PostRecord::text("A")]);
    }
}
