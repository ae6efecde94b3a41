//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while building or running the pipeline
///
/// Per-record content problems never surface here; they degrade to absent
/// or null fields. Only configuration and input-shape problems are fatal.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input is not a sequence of records
    #[error("Invalid input shape: {0}")]
    InputShape(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Label or phrase pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Vocabulary/configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<regex::Error> for ExtractorError {
    fn from(e: regex::Error) -> Self {
        ExtractorError::Pattern(e.to_string())
    }
}
