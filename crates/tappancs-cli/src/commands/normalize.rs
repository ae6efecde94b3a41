//! Normalize command implementation.

use crate::cli::NormalizeArgs;
use crate::commands::load_vocabulary;
use crate::config::Config;
use crate::error::Result;
use crate::output::{FileSink, Formatter};
use tappancs_domain::{RecordSink, RecordSource};
use tappancs_extractor::{JsonFileSource, Pipeline, PipelineResult};

/// Execute the normalize command.
///
/// The dataset goes to `--output` when given, otherwise to stdout. The
/// summary and any warnings always go to stderr.
pub fn execute_normalize(
    args: NormalizeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<PipelineResult> {
    let vocabulary_path = args.vocabulary.as_deref().or(config.vocabulary.as_deref());
    let pipeline = Pipeline::new(load_vocabulary(vocabulary_path)?)?;

    let mut source = JsonFileSource::new(&args.input);
    let records = source.load()?;
    let result = pipeline.run(&records);

    let format = args.format.map(Into::into).unwrap_or(config.settings.format);

    match &args.output {
        Some(path) => {
            let mut sink = FileSink::new(path, format);
            sink.write(&result.dataset)?;
            eprintln!(
                "{}",
                formatter.success(&format!(
                    "Wrote {} record(s) with {} column(s) to {}",
                    result.metadata.records_out,
                    result.metadata.column_count,
                    path.display()
                ))
            );
        }
        None => {
            println!("{}", formatter.format_dataset(&result.dataset, format)?);
            eprintln!(
                "{}",
                formatter.info(&format!(
                    "{} record(s), {} column(s) in {} ms",
                    result.metadata.records_out,
                    result.metadata.column_count,
                    result.metadata.processing_time_ms
                ))
            );
        }
    }

    for line in formatter.report(&result.report) {
        eprintln!("{}", line);
    }

    Ok(result)
}
