//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use colored::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tappancs_domain::{NormalizedDataset, RecordSink};
use tappancs_extractor::NormalizeReport;

/// Longest cell shown in table output before truncation.
const MAX_TABLE_CELL: usize = 40;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Render a dataset in the requested format.
    pub fn format_dataset(&self, dataset: &NormalizedDataset, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(dataset)?),
            OutputFormat::Jsonl => format_jsonl(dataset),
            OutputFormat::Csv => format_csv(dataset),
            OutputFormat::Table => Ok(self.format_dataset_table(dataset)),
        }
    }

    /// Format the dataset as a table.
    fn format_dataset_table(&self, dataset: &NormalizedDataset) -> String {
        if dataset.is_empty() {
            return self.colorize("No records.", "yellow");
        }

        let columns = dataset.columns();
        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(String::as_str));

        for record in dataset.iter() {
            builder.push_record(columns.iter().map(|col| {
                record
                    .get(col)
                    .map(|value| truncate(&value.to_string(), MAX_TABLE_CELL))
                    .unwrap_or_default()
            }));
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format label/value pairs recovered by the tokenizer.
    pub fn format_pairs(&self, pairs: &[(String, String)]) -> String {
        if pairs.is_empty() {
            return self.colorize("No labels found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Label", "Value"]);
        for (label, value) in pairs {
            builder.push_record([label.as_str(), value.as_str()]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// Summarize a normalization report.
    pub fn report(&self, report: &NormalizeReport) -> Vec<String> {
        let mut lines = Vec::new();
        for (label, count) in &report.dropped_labels {
            lines.push(self.warning(&format!(
                "Dropped unmapped label '{}' ({} record(s))",
                label, count
            )));
        }
        if report.unparsed_ages > 0 {
            lines.push(self.warning(&format!(
                "{} age value(s) could not be parsed",
                report.unparsed_ages
            )));
        }
        lines
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn format_jsonl(dataset: &NormalizedDataset) -> Result<String> {
    let mut out = String::new();
    for record in dataset.iter() {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

fn format_csv(dataset: &NormalizedDataset) -> Result<String> {
    let columns = dataset.columns();
    let mut buf = Vec::new();

    write_csv_row(&mut buf, &columns)?;
    for record in dataset.iter() {
        let row: Vec<String> = columns
            .iter()
            .map(|col| record.get(col).map(ToString::to_string).unwrap_or_default())
            .collect();
        write_csv_row(&mut buf, &row)?;
    }

    String::from_utf8(buf).map_err(|e| CliError::InvalidInput(format!("CSV is not UTF-8: {}", e)))
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row, quoting fields as needed.
fn write_csv_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// [`RecordSink`] writing the dataset to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
}

impl FileSink {
    /// Create a sink for `path` in the given format.
    pub fn new(path: impl AsRef<Path>, format: OutputFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    type Error = CliError;

    fn write(&mut self, dataset: &NormalizedDataset) -> Result<()> {
        // Files never get ANSI colors
        let rendered = Formatter::new(false).format_dataset(dataset, self.format)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, rendered)?;
        Ok(())
    }
}
