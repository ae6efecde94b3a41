//! Vocabulary command implementation.

use crate::cli::VocabularyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use tappancs_extractor::Vocabulary;

/// Execute the vocabulary command.
pub fn execute_vocabulary(args: VocabularyArgs, formatter: &Formatter) -> Result<()> {
    let rendered = Vocabulary::default()
        .to_toml()
        .map_err(|e| CliError::Config(format!("Failed to serialize vocabulary: {}", e)))?;

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, rendered)?;
            eprintln!(
                "{}",
                formatter.success(&format!("Vocabulary written to {}", path.display()))
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
