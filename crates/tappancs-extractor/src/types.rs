//! Result and report types for a pipeline run

use std::collections::BTreeMap;
use tappancs_domain::NormalizedDataset;

/// What the normalizer discarded or could not parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Labels with no rename entry, with how many records carried them
    pub dropped_labels: BTreeMap<String, usize>,

    /// Age values present but not parseable (normalized to null)
    pub unparsed_ages: usize,
}

/// Result of a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The normalized rows
    pub dataset: NormalizedDataset,

    /// Normalization diagnostics
    pub report: NormalizeReport,

    /// Metadata about the run
    pub metadata: RunMetadata,
}

/// Metadata about a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    /// Number of raw records consumed
    pub records_in: usize,

    /// Number of normalized records produced
    pub records_out: usize,

    /// Number of distinct columns produced
    pub column_count: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
