mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

/// Environment variable overriding the log filter chosen from the flags.
const LOG_ENV: &str = "PROJECTIONIST_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::run(cli.command, cli.from.as_deref(), cli.format, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
