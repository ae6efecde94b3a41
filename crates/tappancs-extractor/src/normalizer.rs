//! Schema normalization over the collected table of flat records
//!
//! Steps, in order:
//!
//! 1. **Rename** source labels to canonical English names. Labels with no
//!    rename entry are dropped, not passed through.
//! 2. **Date truncation**: `adoptable_date` is cut at the "anytime after"
//!    marker.
//! 3. **Age parsing**: `age` becomes a number of years.
//! 4. **Categorical translation** over every text cell.

use crate::config::Vocabulary;
use crate::delimiters::canonical_label;
use crate::types::NormalizeReport;
use std::collections::{HashMap, HashSet};
use tappancs_domain::{FieldValue, FlatRecord, NormalizedDataset, NormalizedRecord};
use tracing::debug;

/// Canonical name of the expected adoptable date field
pub const ADOPTABLE_DATE_FIELD: &str = "adoptable_date";

/// Canonical name of the age field
pub const AGE_FIELD: &str = "age";

/// Table-wide normalizer driven by a [`Vocabulary`]
pub struct SchemaNormalizer<'a> {
    vocabulary: &'a Vocabulary,
    canonical: HashSet<&'a str>,
    rename: HashMap<String, &'a str>,
    translations: HashMap<String, Option<&'a str>>,
}

impl<'a> SchemaNormalizer<'a> {
    /// Create a normalizer
    ///
    /// Rename keys, translation keys and null markers are canonicalized the
    /// same way as the labels the tokenizer emits.
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        let rename = vocabulary
            .rename
            .iter()
            .map(|(k, v)| (canonical_label(k), v.as_str()))
            .collect();

        let mut translations: HashMap<String, Option<&str>> = vocabulary
            .translations
            .iter()
            .map(|(k, v)| (canonical_label(k), Some(v.as_str())))
            .collect();
        for marker in &vocabulary.null_markers {
            translations.insert(canonical_label(marker), None);
        }

        Self {
            vocabulary,
            canonical: vocabulary.canonical_names(),
            rename,
            translations,
        }
    }

    /// Normalize every record; row count and order are preserved
    pub fn normalize(&self, records: Vec<FlatRecord>) -> (NormalizedDataset, NormalizeReport) {
        let mut report = NormalizeReport::default();
        let normalized = records
            .into_iter()
            .map(|record| self.normalize_record(record, &mut report))
            .collect();

        (NormalizedDataset::new(normalized), report)
    }

    /// Re-normalize an already normalized dataset
    ///
    /// Keys are canonical already, so they survive the rename step; values
    /// without a translation entry are left as they are.
    pub fn renormalize(&self, dataset: NormalizedDataset) -> NormalizedDataset {
        let flats = dataset
            .into_iter()
            .map(|record| {
                let mut flat = FlatRecord::new();
                flat.extend(record.iter().map(|(k, v)| (k.clone(), v.clone())));
                flat
            })
            .collect();
        self.normalize(flats).0
    }

    fn normalize_record(&self, record: FlatRecord, report: &mut NormalizeReport) -> NormalizedRecord {
        let mut out = NormalizedRecord::new();

        for (key, value) in record {
            match self.canonical_name(&key) {
                Some(name) => out.insert(name, value),
                None => {
                    debug!("Dropping unmapped label '{}'", key);
                    *report.dropped_labels.entry(key).or_insert(0) += 1;
                }
            }
        }

        if let Some(value) = out.get_mut(ADOPTABLE_DATE_FIELD) {
            *value = truncate_date(value, &self.vocabulary.adoptable_date_marker);
        }

        if let Some(value) = out.get_mut(AGE_FIELD) {
            let parsed = parse_age(value, &self.vocabulary.months_token);
            if parsed.is_null() && !value.is_null() {
                report.unparsed_ages += 1;
            }
            *value = parsed;
        }

        for value in out.values_mut() {
            if let FieldValue::Text(text) = value {
                if let Some(target) = self.translations.get(text.as_str()) {
                    *value = FieldValue::from(target.map(str::to_string));
                }
            }
        }

        out
    }

    fn canonical_name(&self, key: &str) -> Option<String> {
        if let Some(name) = self.rename.get(key) {
            return Some(name.to_string());
        }
        // Pass-through names and already-canonical keys map to themselves
        self.canonical.contains(key).then(|| key.to_string())
    }
}

/// Keep only the part of a date before `marker`
///
/// The marker is matched case-insensitively. Values without it are
/// unchanged. An empty prefix becomes null, since a bare "anytime after"
/// carries no date.
pub fn truncate_date(value: &FieldValue, marker: &str) -> FieldValue {
    match value {
        FieldValue::Text(text) => match find_ignore_case(text, marker) {
            Some(idx) => {
                let prefix = text[..idx].trim();
                if prefix.is_empty() {
                    FieldValue::Null
                } else {
                    FieldValue::text(prefix)
                }
            }
            None => value.clone(),
        },
        other => other.clone(),
    }
}

/// Parse an age description into fractional years
///
/// The first integer in the text is the age; if the text contains
/// `months_token` the integer counts months and is divided by 12. Text
/// without digits becomes null. A number is already parsed and is kept;
/// any other kind of value becomes null.
///
/// # Examples
///
/// ```
/// use tappancs_domain::FieldValue;
/// use tappancs_extractor::normalizer::parse_age;
///
/// assert_eq!(parse_age(&FieldValue::text("3 éves"), "hónapos"), FieldValue::Number(3.0));
/// assert_eq!(parse_age(&FieldValue::text("6 hónapos"), "hónapos"), FieldValue::Number(0.5));
/// assert_eq!(parse_age(&FieldValue::text("kölyök"), "hónapos"), FieldValue::Null);
/// ```
pub fn parse_age(value: &FieldValue, months_token: &str) -> FieldValue {
    match value {
        FieldValue::Text(text) => match first_integer(text) {
            Some(n) if find_ignore_case(text, months_token).is_some() => {
                FieldValue::Number(n as f64 / 12.0)
            }
            Some(n) => FieldValue::Number(n as f64),
            None => FieldValue::Null,
        },
        FieldValue::Number(n) => FieldValue::Number(*n),
        _ => FieldValue::Null,
    }
}

/// Byte offset of the first case-insensitive occurrence of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(idx, _)| idx).find(|&idx| {
        let mut rest = haystack[idx..].chars().flat_map(char::to_lowercase);
        needle
            .chars()
            .flat_map(char::to_lowercase)
            .all(|c| rest.next() == Some(c))
    })
}

fn first_integer(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}
