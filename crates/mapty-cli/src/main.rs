//! Mapty CLI - Command-line interface
//!
//! The shell around the workout session: it collects form input, stands in
//! for the map widget, and renders the workout list.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod map;
mod output;
mod output_types;
mod storage;

use clap::Parser;
use cli::Cli;
use output::OutputWriter;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();
    let output = OutputWriter::new(cli.json);

    let result = tokio::runtime::Runtime::new()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(commands::execute(cli, &output)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if output.is_json() {
                output.error(format!("{:#}", err));
            } else {
                errors::from_anyhow(err).display();
            }
            ExitCode::FAILURE
        }
    }
}
