//! Core Pipeline implementation

use crate::config::Vocabulary;
use crate::delimiters::canonicalize;
use crate::error::ExtractorError;
use crate::free_text::FreeTextExtractor;
use crate::input::parse_raw_records;
use crate::merger::RecordMerger;
use crate::normalizer::SchemaNormalizer;
use crate::table::TableRowExtractor;
use crate::tokenizer::LabelMatcher;
use crate::types::{NormalizeReport, PipelineResult, RunMetadata};
use std::time::Instant;
use tappancs_domain::{FlatRecord, NormalizedDataset, RawRecord};
use tracing::{debug, info, warn};

/// The Pipeline turns raw shelter records into a normalized dataset
///
/// Built once per run from an immutable [`Vocabulary`]; the compiled label
/// matcher and table rewrites are reused for every record.
pub struct Pipeline {
    vocabulary: Vocabulary,
    matcher: LabelMatcher,
    table: TableRowExtractor,
}

impl Pipeline {
    /// Create a new Pipeline
    pub fn new(vocabulary: Vocabulary) -> Result<Self, ExtractorError> {
        vocabulary.validate().map_err(ExtractorError::Config)?;

        let labels = canonicalize(&vocabulary.delimiters);
        let matcher = LabelMatcher::compile(&labels)?;
        let table = TableRowExtractor::new(&vocabulary.table_phrases)?;

        debug!(
            "Pipeline ready: {} label(s), {} rename entries, {} translations",
            labels.len(),
            vocabulary.rename.len(),
            vocabulary.translations.len()
        );

        Ok(Self {
            vocabulary,
            matcher,
            table,
        })
    }

    /// Pipeline with the built-in vocabulary
    pub fn with_default_vocabulary() -> Result<Self, ExtractorError> {
        Self::new(Vocabulary::default())
    }

    /// The vocabulary this pipeline was built from
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The compiled label matcher
    pub fn matcher(&self) -> &LabelMatcher {
        &self.matcher
    }

    fn merger(&self) -> RecordMerger<'_> {
        let free_text = FreeTextExtractor::new(&self.matcher, &self.vocabulary.free_text_fields);
        RecordMerger::new(free_text, &self.table, &self.vocabulary.passthrough_fields)
    }

    /// Extract and merge a single record (no normalization)
    pub fn extract(&self, record: &RawRecord) -> FlatRecord {
        self.merger().merge(record)
    }

    /// Extract and merge every record, preserving order
    pub fn extract_all(&self, records: &[RawRecord]) -> Vec<FlatRecord> {
        self.merger().merge_all(records)
    }

    /// Normalize a complete table of flat records
    pub fn normalize(&self, records: Vec<FlatRecord>) -> (NormalizedDataset, NormalizeReport) {
        SchemaNormalizer::new(&self.vocabulary).normalize(records)
    }

    /// Run the whole pipeline over a complete collection of raw records
    pub fn run(&self, records: &[RawRecord]) -> PipelineResult {
        let start = Instant::now();
        info!("Starting normalization of {} record(s)", records.len());

        let flats = self.extract_all(records);
        let (dataset, report) = self.normalize(flats);

        if !report.dropped_labels.is_empty() {
            let labels: Vec<&str> = report.dropped_labels.keys().map(String::as_str).collect();
            warn!("Dropped unmapped label(s): {}", labels.join(", "));
        }
        if report.unparsed_ages > 0 {
            warn!("{} age value(s) could not be parsed", report.unparsed_ages);
        }

        let metadata = RunMetadata {
            records_in: records.len(),
            records_out: dataset.len(),
            column_count: dataset.columns().len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Normalized {} record(s) into {} column(s) in {} ms",
            metadata.records_out, metadata.column_count, metadata.processing_time_ms
        );

        PipelineResult {
            dataset,
            report,
            metadata,
        }
    }

    /// Parse a crawler JSON dump and run the pipeline over it
    ///
    /// Fails fast if the input is not a JSON array; per-record problems
    /// never abort the batch.
    pub fn run_json(&self, json: &str) -> Result<PipelineResult, ExtractorError> {
        let records = parse_raw_records(json)?;
        Ok(self.run(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_vocabulary_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.months_token = String::new();

        let result = Pipeline::new(vocabulary);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_extract_single_record() {
        let pipeline = Pipeline::with_default_vocabulary().unwrap();
        let record = RawRecord {
            data: Some("Kutya fajtája Husky Kora 4 éves".to_string()),
            ..Default::default()
        };

        let flat = pipeline.extract(&record);
        assert_eq!(flat.get("kutya fajtája").and_then(|v| v.as_str()), Some("husky"));
        assert_eq!(flat.get("kora").and_then(|v| v.as_str()), Some("4 éves"));
    }

    #[test]
    fn test_run_metadata() {
        let pipeline = Pipeline::with_default_vocabulary().unwrap();
        let records = vec![
            RawRecord {
                uid: Some("a".to_string()),
                data: Some("Kora 2 éves".to_string()),
                ..Default::default()
            },
            RawRecord::default(),
        ];

        let result = pipeline.run(&records);
        assert_eq!(result.metadata.records_in, 2);
        assert_eq!(result.metadata.records_out, 2);
        assert_eq!(result.metadata.column_count, 2);
    }

    #[test]
    fn test_run_json_rejects_non_array() {
        let pipeline = Pipeline::with_default_vocabulary().unwrap();
        assert!(matches!(
            pipeline.run_json(r#""just a string""#),
            Err(ExtractorError::InputShape(_))
        ));
    }
}
