//! Tappancs CLI - Normalize scraped shelter profiles from the command line.

use clap::Parser;
use tappancs_cli::commands;
use tappancs_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Settings may be what failed to load, so only the flag decides color here
    let error_formatter = Formatter::new(!cli.no_color);

    if let Err(e) = run(cli) {
        eprintln!("{}", error_formatter.error(&format!("Error: {}", e)));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> tappancs_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(color_enabled);

    match cli.command {
        Command::Normalize(args) => {
            commands::execute_normalize(args, &config, &formatter)?;
        }
        Command::Tokenize(args) => {
            commands::execute_tokenize(args, &formatter)?;
        }
        Command::Vocabulary(args) => {
            commands::execute_vocabulary(args, &formatter)?;
        }
    }

    Ok(())
}
