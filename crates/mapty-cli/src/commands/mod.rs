//! Command implementations

mod add;
mod list;
mod reset;
mod show;
mod status;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(&cli)?;

    match cli.command {
        Commands::Add(args) => add::execute(args, &config, output).await,
        Commands::List => list::execute(&config, output),
        Commands::Show(args) => show::execute(args, &config, output),
        Commands::Reset(args) => reset::execute(args, &config, output),
        Commands::Status => status::execute(&config, output).await,
    }
}
