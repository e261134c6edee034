//! Reset command implementation

use crate::cli::ResetArgs;
use crate::output::OutputWriter;
use crate::storage::restore_session;
use anyhow::{bail, Context, Result};
use mapty_core::config::LayeredConfig;

pub fn execute(args: ResetArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (mut session, _) = restore_session(config, output)?;
    let count = session.len();

    if !args.yes {
        bail!(
            "This deletes all {} logged workouts. Run again with --yes to confirm",
            count
        );
    }

    session.reset().context("Failed to clear stored workouts")?;

    if output.is_json() {
        output.result(serde_json::json!({ "removed": count }))?;
    } else {
        output.success(format!("Removed {} workouts", count));
    }

    Ok(())
}
