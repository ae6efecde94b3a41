//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Tappancs CLI - Normalize scraped shelter profiles into a tabular dataset.
#[derive(Debug, Parser)]
#[command(name = "tappancs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TAPPANCS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty JSON array (default)
    Json,
    /// One JSON object per line
    Jsonl,
    /// CSV over the union of columns
    Csv,
    /// Human-readable table
    Table,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Jsonl => OutputFormat::Jsonl,
            CliFormat::Csv => OutputFormat::Csv,
            CliFormat::Table => OutputFormat::Table,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize a crawler dump into a dataset
    Normalize(NormalizeArgs),

    /// Show the label/value pairs recovered from one text block
    Tokenize(TokenizeArgs),

    /// Print the built-in vocabulary as TOML
    Vocabulary(VocabularyArgs),
}

/// Arguments for the normalize command.
#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// Raw records JSON file (array of scraped profiles)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the dataset here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Vocabulary TOML file (defaults to the built-in vocabulary)
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,
}

/// Arguments for the tokenize command.
#[derive(Debug, Parser)]
pub struct TokenizeArgs {
    /// Text block to tokenize
    pub text: Option<String>,

    /// Read the text block from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Vocabulary TOML file (defaults to the built-in vocabulary)
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,
}

/// Arguments for the vocabulary command.
#[derive(Debug, Parser)]
pub struct VocabularyArgs {
    /// Write the vocabulary here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_normalize() {
        let cli = Cli::try_parse_from([
            "tappancs", "-vv", "normalize", "--input", "dogs.json", "--format", "csv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Normalize(args) => {
                assert_eq!(args.input, PathBuf::from("dogs.json"));
                assert!(matches!(args.format, Some(CliFormat::Csv)));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_normalize_requires_input() {
        assert!(Cli::try_parse_from(["tappancs", "normalize"]).is_err());
    }
}
