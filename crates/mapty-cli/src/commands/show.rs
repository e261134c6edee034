//! Show command implementation

use crate::cli::ShowArgs;
use crate::map::TerminalMap;
use crate::output::OutputWriter;
use crate::output_types::{ShowOutput, WorkoutSummary};
use crate::storage::restore_session;
use anyhow::Result;
use mapty_core::config::LayeredConfig;
use mapty_core::models::{marker_label, WorkoutDetails, WorkoutId};
use mapty_core::ports::MapView;
use mapty_core::MaptyError;

pub fn execute(args: ShowArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (session, _) = restore_session(config, output)?;

    let id = WorkoutId::new(args.id.trim());
    let workout = session
        .find_by_id(&id)
        .ok_or_else(|| MaptyError::WorkoutNotFound { id: id.to_string() })?;

    let zoom = config.map_zoom.value;
    let mut map = TerminalMap::new(zoom);
    map.center_on(workout.coordinates(), zoom);

    if output.is_json() {
        return output.result(ShowOutput { workout: WorkoutSummary::from(workout), zoom });
    }

    map.flush(output);
    output.section(marker_label(workout));
    output.kv("Id", workout.id());
    output.kv("Location", workout.coordinates());
    output.kv("Distance", format!("{} km", workout.distance()));
    output.kv("Duration", format!("{} min", workout.duration()));
    match *workout.details() {
        WorkoutDetails::Running { cadence, pace } => {
            output.kv("Pace", format!("{} min/km", pace));
            output.kv("Cadence", format!("{} spm", cadence));
        }
        WorkoutDetails::Cycling { elevation_gain, speed } => {
            output.kv("Speed", format!("{} km/h", speed));
            output.kv("Elevation gain", format!("{} m", elevation_gain));
        }
    }

    Ok(())
}
