//! Trait definitions for external interactions
//!
//! The crawler that produces raw records and the store that persists the
//! normalized dataset are collaborators outside this workspace. These traits
//! define the boundaries; implementations live in other crates.

use crate::{NormalizedDataset, RawRecord};

/// Producer of raw records
///
/// Implemented by whatever hands over scraped profiles (a JSON dump on
/// disk, a live crawler). The whole collection is delivered at once because
/// normalization needs the complete column set.
pub trait RecordSource {
    /// Error type for load operations
    type Error;

    /// Load every raw record, in producer order
    fn load(&mut self) -> Result<Vec<RawRecord>, Self::Error>;
}

/// Consumer of the normalized dataset
///
/// Implemented by the persistence layer (file writers in the CLI).
pub trait RecordSink {
    /// Error type for write operations
    type Error;

    /// Persist the dataset
    fn write(&mut self, dataset: &NormalizedDataset) -> Result<(), Self::Error>;
}
