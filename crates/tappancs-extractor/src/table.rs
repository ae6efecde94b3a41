//! Parser for the workflow table block
//!
//! The table is scraped as one row per line under a header line, each row
//! holding a value followed by its label:
//!
//! ```text
//! Dátum Állapot
//! 2023.01.05 Gazdit keres
//! 2023.03.18 Gazdira talált
//! ```
//!
//! Multi-word labels are rewritten to single tokens first so the split on
//! the first space keeps them whole.

use crate::config::PhraseRewrite;
use crate::error::ExtractorError;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use tracing::debug;

/// Extracts label→value pairs from the table block
#[derive(Debug, Clone)]
pub struct TableRowExtractor {
    rewrites: Vec<(Regex, String)>,
}

impl TableRowExtractor {
    /// Compile the phrase rewrites (literal, case-insensitive)
    pub fn new(rewrites: &[PhraseRewrite]) -> Result<Self, ExtractorError> {
        let rewrites = rewrites
            .iter()
            .map(|rw| -> Result<(Regex, String), ExtractorError> {
                let pattern = RegexBuilder::new(&regex::escape(&rw.phrase))
                    .case_insensitive(true)
                    .build()?;
                Ok((pattern, rw.token.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rewrites })
    }

    /// Parse the table into a label→value mapping
    ///
    /// The first line is a header and always discarded. Rows without a space
    /// are dropped. If a label repeats, the last row wins.
    pub fn extract(&self, table: &str) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();

        for line in table.lines().skip(1) {
            let line = self.rewrite(line);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((value, label)) = line.split_once(' ') else {
                debug!("Dropping table row without separator: '{}'", line);
                continue;
            };

            let label = label.trim().to_lowercase();
            if label.is_empty() {
                continue;
            }
            values.insert(label, value.trim().to_string());
        }

        values
    }

    fn rewrite(&self, line: &str) -> String {
        let mut line = line.to_string();
        for (pattern, token) in &self.rewrites {
            line = pattern
                .replace_all(&line, regex::NoExpand(token.as_str()))
                .into_owned();
        }
        line
    }
}
