//! Record types for each stage of the pipeline

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, HashSet};

/// One scraped shelter profile, as produced by the crawler
///
/// Every field is optional: the crawler stores `null` for page elements it
/// could not find, and the pipeline treats absence as a non-error.
/// Immutable once produced; consumed exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Opaque stable identifier
    #[serde(default)]
    pub uid: Option<String>,

    /// Profile page URL
    #[serde(default)]
    pub page_url: Option<String>,

    /// Image URLs downloaded from the profile, in page order
    #[serde(default)]
    pub downloaded_urls: Option<Vec<String>>,

    /// Free description of the animal
    #[serde(default)]
    pub description: Option<String>,

    /// Main data panel
    #[serde(default)]
    pub data: Option<String>,

    /// Traits panel
    #[serde(default, rename = "trait")]
    pub traits: Option<String>,

    /// Behaviour panel
    #[serde(default)]
    pub behavior: Option<String>,

    /// Workflow table block ("VALUE LABEL" rows under a header line)
    #[serde(default)]
    pub table: Option<String>,
}

impl RawRecord {
    /// Look up a text block by its producer-side field name
    ///
    /// Returns `None` for unknown names, absent blocks and the image list.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        let field = match name {
            "uid" => &self.uid,
            "page_url" => &self.page_url,
            "description" => &self.description,
            "data" => &self.data,
            "trait" => &self.traits,
            "behavior" => &self.behavior,
            "table" => &self.table,
            _ => return None,
        };
        field.as_deref()
    }

    /// Fetch a field as a cell value, keeping its original type
    ///
    /// `downloaded_urls` comes back as a list; every other known field as
    /// text. Absent fields return `None`.
    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        if name == "downloaded_urls" {
            return self.downloaded_urls.clone().map(FieldValue::List);
        }
        self.text_field(name).map(FieldValue::text)
    }
}

/// Merged per-animal mapping, keyed by source label or pass-through name
///
/// At most one value per key; inserting an existing key overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl FlatRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Overlay every entry of `other`, overwriting existing keys
    pub fn extend<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        for (k, v) in other {
            self.insert(k, v);
        }
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl IntoIterator for FlatRecord {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Final per-animal record keyed by canonical field names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl NormalizedRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Mutable access to a field
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(key)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    /// Mutable iteration over values
    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, String, FieldValue> {
        self.fields.values_mut()
    }
}

impl FromIterator<(String, FieldValue)> for NormalizedRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Ordered normalized rows, one per input record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedDataset {
    records: Vec<NormalizedRecord>,
}

impl NormalizedDataset {
    /// Wrap already-normalized records
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }

    /// Union of column names actually produced, in first-seen order
    ///
    /// # Examples
    ///
    /// ```
    /// use tappancs_domain::{NormalizedDataset, NormalizedRecord};
    ///
    /// let mut a = NormalizedRecord::new();
    /// a.insert("uid", "a1");
    /// let mut b = NormalizedRecord::new();
    /// b.insert("age", 2.0);
    /// b.insert("uid", "b2");
    ///
    /// let dataset = NormalizedDataset::new(vec![a, b]);
    /// assert_eq!(dataset.columns(), vec!["uid", "age"]);
    /// ```
    pub fn columns(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for record in &self.records {
            for key in record.fields.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    /// Borrow the records
    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in input order
    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRecord> {
        self.records.iter()
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<NormalizedRecord> {
        self.records
    }
}

impl IntoIterator for NormalizedDataset {
    type Item = NormalizedRecord;
    type IntoIter = std::vec::IntoIter<NormalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_from_producer_json() {
        let json = r#"{
            "data": "Kora 2 éves",
            "description": null,
            "trait": "Szín fekete",
            "behavior": null,
            "table": null,
            "downloaded_urls": ["https://example.org/1.jpg"],
            "uid": "0a1b2c3d",
            "page_url": "https://example.org/dog"
        }"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.uid.as_deref(), Some("0a1b2c3d"));
        assert_eq!(record.text_field("trait"), Some("Szín fekete"));
        assert_eq!(record.text_field("behavior"), None);
        assert_eq!(record.text_field("unknown"), None);
        assert_eq!(
            record.field_value("downloaded_urls"),
            Some(FieldValue::List(vec!["https://example.org/1.jpg".into()]))
        );
    }

    #[test]
    fn test_raw_record_missing_fields_default_to_none() {
        let record: RawRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, RawRecord::default());
        assert_eq!(record.field_value("downloaded_urls"), None);
    }

    #[test]
    fn test_flat_record_overwrite() {
        let mut record = FlatRecord::new();
        record.insert("kora", "2 éves");
        record.extend(vec![("kora", "3 éves"), ("ivar", "kan")]);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("kora"), Some(&FieldValue::text("3 éves")));
    }

    #[test]
    fn test_columns_empty_dataset() {
        let dataset = NormalizedDataset::default();
        assert!(dataset.columns().is_empty());
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_dataset_serializes_as_array() {
        let mut record = NormalizedRecord::new();
        record.insert("age", 2.0);
        record.insert("gender", "male");
        let dataset = NormalizedDataset::new(vec![record]);

        let json = serde_json::to_string(&dataset).unwrap();
        assert_eq!(json, r#"[{"age":2.0,"gender":"male"}]"#);
    }
}
