//! Label/value extraction across the free-text panels of a record

use crate::tokenizer::LabelMatcher;
use std::collections::BTreeMap;
use tappancs_domain::RawRecord;
use tracing::debug;

/// Runs the label tokenizer over each configured free-text field
pub struct FreeTextExtractor<'a> {
    matcher: &'a LabelMatcher,
    fields: &'a [String],
}

impl<'a> FreeTextExtractor<'a> {
    /// Create an extractor scanning `fields` in the given order
    pub fn new(matcher: &'a LabelMatcher, fields: &'a [String]) -> Self {
        Self { matcher, fields }
    }

    /// Fold every field's label/value pairs into one mapping
    ///
    /// Fields are applied in order, so a label found in a later field
    /// overwrites the same label from an earlier one. Absent or blank fields
    /// are skipped.
    pub fn extract(&self, record: &RawRecord) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();

        for field in self.fields {
            let Some(text) = record.text_field(field) else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }

            let pairs = self.matcher.pairs(text);
            debug!("Field '{}': {} label(s)", field, pairs.len());
            values.extend(pairs);
        }

        values
    }
}
