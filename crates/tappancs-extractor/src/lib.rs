//! Tappancs Extractor
//!
//! Turns scraped shelter profile text into a normalized dataset of one
//! record per animal.
//!
//! # Overview
//!
//! Profile pages are scraped as loose text: panels where labels run straight
//! into their values, and a workflow table of "VALUE LABEL" rows. The
//! extractor recovers label/value pairs from both, merges them with the
//! pass-through fields, and normalizes the result into canonical English
//! field names with typed values.
//!
//! # Architecture
//!
//! ```text
//! RawRecord ─┬─ FreeTextExtractor (LabelMatcher) ─┐
//!            ├─ TableRowExtractor ────────────────┼─ RecordMerger → FlatRecord
//!            └─ pass-through fields ──────────────┘
//!
//! [FlatRecord] → SchemaNormalizer → NormalizedDataset
//! ```
//!
//! Extraction is independent per record. Normalization runs only once the
//! whole table is collected.
//!
//! # Example Usage
//!
//! ```
//! use tappancs_domain::{FieldValue, RawRecord};
//! use tappancs_extractor::Pipeline;
//!
//! let pipeline = Pipeline::with_default_vocabulary()?;
//!
//! let record = RawRecord {
//!     data: Some("Kora 2 éves Ivar Kan".to_string()),
//!     ..Default::default()
//! };
//!
//! let result = pipeline.run(&[record]);
//! let row = &result.dataset.records()[0];
//!
//! assert_eq!(row.get("age"), Some(&FieldValue::Number(2.0)));
//! assert_eq!(row.get("gender"), Some(&FieldValue::text("male")));
//! # Ok::<(), tappancs_extractor::ExtractorError>(())
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod free_text;
mod merger;
mod pipeline;
mod table;

pub mod delimiters;
pub mod input;
pub mod normalizer;
pub mod tokenizer;


pub use error::ExtractorError;
pub use config::{PhraseRewrite, Vocabulary};
pub use types::{NormalizeReport, PipelineResult, RunMetadata};
pub use free_text::FreeTextExtractor;
pub use input::{parse_raw_records, JsonFileSource};
pub use merger::RecordMerger;
pub use normalizer::SchemaNormalizer;
pub use pipeline::Pipeline;
pub use table::TableRowExtractor;
pub use tokenizer::{LabelMatcher, Segments};
