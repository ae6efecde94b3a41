//! Tappancs Domain Layer
//!
//! This crate holds the data model shared by every other crate in the
//! workspace. It knows nothing about tokenizing or vocabularies; it only
//! describes what an animal record looks like at each stage of the pipeline
//! and the boundaries to the outside world.
//!
//! ## Key Concepts
//!
//! - **RawRecord**: one scraped shelter profile, as handed over by the crawler
//! - **FlatRecord**: merged label→value mapping, not yet normalized
//! - **NormalizedRecord**: canonical English field names with typed values
//! - **NormalizedDataset**: ordered rows, one per raw record
//! - **FieldValue**: the tagged union every cell is made of
//!
//! ## Architecture
//!
//! ```text
//! RecordSource → RawRecord → (extractor) → NormalizedDataset → RecordSink
//! ```
//!
//! The only dependency is `serde`, because records cross the producer and
//! consumer boundaries as JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod record;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use record::{FlatRecord, NormalizedDataset, NormalizedRecord, RawRecord};
pub use traits::{RecordSink, RecordSource};
pub use value::FieldValue;
