//! Loading raw records from the crawler's JSON dump

use crate::error::ExtractorError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tappancs_domain::{RawRecord, RecordSource};
use tracing::{info, warn};

/// Parse the crawler's JSON dump into raw records
///
/// The top-level value must be an array; anything else is rejected before
/// any record is looked at. Individual elements are read leniently: a field
/// with the wrong JSON type is treated as absent, and an element that is not
/// an object still yields an (empty) record so row count is preserved.
pub fn parse_raw_records(json: &str) -> Result<Vec<RawRecord>, ExtractorError> {
    let value: Value = serde_json::from_str(json)?;
    raw_records_from_value(&value)
}

/// Same as [`parse_raw_records`] for an already parsed JSON value
pub fn raw_records_from_value(value: &Value) -> Result<Vec<RawRecord>, ExtractorError> {
    let items = value.as_array().ok_or_else(|| {
        ExtractorError::InputShape(format!(
            "expected a JSON array of records, found {}",
            json_kind(value)
        ))
    })?;

    let records = items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item.as_object() {
            Some(obj) => parse_record(idx, obj),
            None => {
                warn!("Record {} is {}, not an object; keeping it empty", idx, json_kind(item));
                RawRecord::default()
            }
        })
        .collect();

    Ok(records)
}

fn parse_record(idx: usize, obj: &Map<String, Value>) -> RawRecord {
    RawRecord {
        uid: string_field(idx, obj, "uid"),
        page_url: string_field(idx, obj, "page_url"),
        downloaded_urls: list_field(idx, obj, "downloaded_urls"),
        description: string_field(idx, obj, "description"),
        data: string_field(idx, obj, "data"),
        traits: string_field(idx, obj, "trait"),
        behavior: string_field(idx, obj, "behavior"),
        table: string_field(idx, obj, "table"),
    }
}

fn string_field(idx: usize, obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => {
            warn!(
                "Record {}: field '{}' is {}, treating as absent",
                idx,
                key,
                json_kind(other)
            );
            None
        }
    }
}

fn list_field(idx: usize, obj: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match obj.get(key)? {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item.as_str() {
                    Some(s) => Some(s.to_string()),
                    None => {
                        warn!("Record {}: skipping non-string entry in '{}'", idx, key);
                        None
                    }
                })
                .collect(),
        ),
        other => {
            warn!(
                "Record {}: field '{}' is {}, treating as absent",
                idx,
                key,
                json_kind(other)
            );
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// [`RecordSource`] reading a crawler dump from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source for the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    type Error = ExtractorError;

    fn load(&mut self) -> Result<Vec<RawRecord>, Self::Error> {
        let contents = fs::read_to_string(&self.path)?;
        let records = parse_raw_records(&contents)?;
        info!("Loaded {} raw record(s) from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_producer_dump() {
        let json = r#"[
            {
                "data": "Státusz Gazdit keres Kora 2 éves",
                "description": "Barátságos kutya.",
                "trait": null,
                "behavior": null,
                "table": "Dátum Állapot\n2023.01.05 Gazdit keres",
                "downloaded_urls": ["https://example.org/0_0.jpg"],
                "uid": "0a1b2c3d",
                "page_url": "https://example.org/gazdit-keresunk/bodri"
            }
        ]"#;

        let records = parse_raw_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uid.as_deref(), Some("0a1b2c3d"));
        assert_eq!(records[0].traits, None);
        assert_eq!(records[0].downloaded_urls.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_not_an_array_is_fatal() {
        let result = parse_raw_records(r#"{"uid": "x"}"#);
        assert!(matches!(result, Err(ExtractorError::InputShape(_))));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let result = parse_raw_records("not json");
        assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_raw_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_fields_are_absent() {
        let json = r#"[
            {"uid": 42, "data": ["Kora"], "downloaded_urls": "x", "page_url": "p"},
            {"downloaded_urls": ["a", 1, "b"]}
        ]"#;
        let records = parse_raw_records(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].uid, None);
        assert_eq!(records[0].data, None);
        assert_eq!(records[0].downloaded_urls, None);
        assert_eq!(records[0].page_url.as_deref(), Some("p"));
        assert_eq!(
            records[1].downloaded_urls,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_non_object_element_keeps_row() {
        let records = parse_raw_records(r#"[1, {"uid": "b"}, null]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], RawRecord::default());
        assert_eq!(records[1].uid.as_deref(), Some("b"));
        assert_eq!(records[2], RawRecord::default());
    }
}
