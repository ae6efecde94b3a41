//! Tokenize command implementation.

use crate::cli::TokenizeArgs;
use crate::commands::load_vocabulary;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::{self, Read};
use tappancs_extractor::Pipeline;

/// Execute the tokenize command.
pub fn execute_tokenize(args: TokenizeArgs, formatter: &Formatter) -> Result<Vec<(String, String)>> {
    let text = match (args.text, args.stdin) {
        (Some(text), false) => text,
        (None, true) => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (Some(_), true) => {
            return Err(CliError::InvalidInput(
                "Give the text as an argument or with --stdin, not both".into(),
            ))
        }
        (None, false) => {
            return Err(CliError::InvalidInput(
                "No text given. Pass it as an argument or use --stdin".into(),
            ))
        }
    };

    let pipeline = Pipeline::new(load_vocabulary(args.vocabulary.as_deref())?)?;
    let pairs = pipeline.matcher().pairs(&text);

    println!("{}", formatter.format_pairs(&pairs));
    Ok(pairs)
}
