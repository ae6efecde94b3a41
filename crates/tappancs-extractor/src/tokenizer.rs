//! Label tokenizer for free-running text blocks
//!
//! Profile panels are scraped as plain text where a label runs straight into
//! its value and the value runs straight into the next label:
//!
//! ```text
//! Kora 2 éves Ivar kan Szín fekete
//! ```
//!
//! The tokenizer compiles every known label into one alternation and splits
//! the block on it. Labels are matched as literal substrings, not whole
//! words, so a label hidden inside an unrelated word is a false positive.
//! Downstream translation tables were built against this behaviour.

use crate::error::ExtractorError;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Compiled alternation over the label vocabulary
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    pattern: Option<Regex>,
}

/// A text block split into value spans and label spans
///
/// `values[0]` is the span before the first label; `values[i + 1]` is the
/// span that follows `labels[i]`. Spans are trimmed but kept even when
/// empty so the two lists stay aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    /// Non-label spans, one more than there are labels
    pub values: Vec<String>,
    /// Matched labels, in text order
    pub labels: Vec<String>,
}

impl Segments {
    /// Label/value pairs in text order
    ///
    /// The leading span belongs to no label and is discarded. A label whose
    /// following span is empty is omitted.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.labels
            .iter()
            .zip(self.values.iter().skip(1))
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| (label.clone(), value.clone()))
            .collect()
    }
}

impl LabelMatcher {
    /// Compile canonical labels into a single alternation
    ///
    /// Labels are sorted longest first so that a label containing a shorter
    /// one (`"male-dog-friendliness"` vs `"friendliness"`) wins when both
    /// match at the same position. Empty labels are skipped; with none left
    /// the matcher never matches.
    pub fn compile<S: AsRef<str>>(labels: &[S]) -> Result<Self, ExtractorError> {
        let mut sorted: Vec<&str> = labels
            .iter()
            .map(AsRef::as_ref)
            .filter(|label| !label.is_empty())
            .collect();

        if sorted.is_empty() {
            debug!("No usable labels, matcher will never match");
            return Ok(Self { pattern: None });
        }

        // Stable sort keeps vocabulary order among equal lengths
        sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let alternation = sorted
            .iter()
            .map(|label| regex::escape(label))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!("({})", alternation))
            .case_insensitive(true)
            .build()?;

        debug!("Compiled label matcher over {} labels", sorted.len());
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Split a text block into aligned value and label spans
    ///
    /// The text is normalized first: line breaks become spaces, then it is
    /// trimmed and lowercased.
    pub fn split(&self, text: &str) -> Segments {
        let normalized = normalize(text);

        let Some(pattern) = &self.pattern else {
            return Segments {
                values: vec![normalized.trim().to_string()],
                labels: Vec::new(),
            };
        };

        let mut values = Vec::new();
        let mut labels = Vec::new();
        let mut last = 0;
        for found in pattern.find_iter(&normalized) {
            values.push(normalized[last..found.start()].trim().to_string());
            labels.push(found.as_str().trim().to_string());
            last = found.end();
        }
        values.push(normalized[last..].trim().to_string());

        Segments { values, labels }
    }

    /// Split a block and return its label/value pairs
    pub fn pairs(&self, text: &str) -> Vec<(String, String)> {
        self.split(text).pairs()
    }
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_lowercase()
}
