//! List command implementation

use crate::output::OutputWriter;
use crate::output_types::{ListOutput, WorkoutRow, WorkoutSummary};
use crate::storage::restore_session;
use anyhow::Result;
use mapty_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (session, report) = restore_session(config, output)?;

    // Newest first, as the list is built by inserting each entry on top
    let newest_first = session.workouts().iter().rev();

    if output.is_json() {
        output.result(ListOutput {
            workouts: newest_first.map(WorkoutSummary::from).collect(),
            warning: report.warning.map(|w| w.to_string()),
        })?;
    } else {
        output.table(newest_first.map(WorkoutRow::from).collect());
        if !session.is_empty() {
            output.info(format!("{} workouts logged", session.len()));
        }
    }

    Ok(())
}
