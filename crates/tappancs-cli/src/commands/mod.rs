//! Command implementations.

pub mod normalize;
pub mod tokenize;
pub mod vocabulary;

pub use self::normalize::execute_normalize;
pub use self::tokenize::execute_tokenize;
pub use self::vocabulary::execute_vocabulary;

use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;
use tappancs_extractor::Vocabulary;
use tracing::info;

/// Load the vocabulary at `path`, or the built-in one when no path is given.
pub fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    let Some(path) = path else {
        return Ok(Vocabulary::default());
    };

    let contents = fs::read_to_string(path)?;
    let vocabulary = Vocabulary::from_toml(&contents)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
    info!("Loaded vocabulary from {}", path.display());
    Ok(vocabulary)
}
