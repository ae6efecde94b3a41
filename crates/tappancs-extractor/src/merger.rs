//! Merge of free-text, table, and pass-through data into one flat record

use crate::free_text::FreeTextExtractor;
use crate::table::TableRowExtractor;
use tappancs_domain::{FlatRecord, RawRecord};

/// Builds one FlatRecord per RawRecord
///
/// Merge order is free text, then table, then pass-through fields; a later
/// writer wins for the same key.
pub struct RecordMerger<'a> {
    free_text: FreeTextExtractor<'a>,
    table: &'a TableRowExtractor,
    passthrough: &'a [String],
}

impl<'a> RecordMerger<'a> {
    /// Create a merger
    pub fn new(
        free_text: FreeTextExtractor<'a>,
        table: &'a TableRowExtractor,
        passthrough: &'a [String],
    ) -> Self {
        Self {
            free_text,
            table,
            passthrough,
        }
    }

    /// Merge a single record
    pub fn merge(&self, record: &RawRecord) -> FlatRecord {
        let mut flat = FlatRecord::new();

        flat.extend(self.free_text.extract(record));

        if let Some(table) = record.table.as_deref() {
            flat.extend(self.table.extract(table));
        }

        for name in self.passthrough {
            if let Some(value) = record.field_value(name) {
                flat.insert(name.clone(), value);
            }
        }

        flat
    }

    /// Merge every record, preserving input order
    pub fn merge_all(&self, records: &[RawRecord]) -> Vec<FlatRecord> {
        records.iter().map(|record| self.merge(record)).collect()
    }
}
