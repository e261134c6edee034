//! Add command implementation

use crate::cli::AddArgs;
use crate::map::{StaticLocationProvider, TerminalMap};
use crate::output::OutputWriter;
use crate::output_types::{AddOutput, WorkoutRow, WorkoutSummary};
use crate::storage::restore_session;
use anyhow::Result;
use mapty_core::config::LayeredConfig;
use mapty_core::input::WorkoutForm;
use mapty_core::models::{click_zoom, marker_label, Coordinates, WorkoutKind};
use mapty_core::ports::{LocationProvider, MapView};

pub async fn execute(args: AddArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let zoom = config.map_zoom.value;

    // The map only loads once the location is known; without it nothing can be logged
    let provider = StaticLocationProvider::new(config.location.value);
    let location = provider.current_location().await?;

    let mut map = TerminalMap::new(zoom);
    map.center_on(location, zoom);

    let (mut session, _) = restore_session(config, output)?;

    // The clicked point opens the form
    let clicked = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
        _ => location,
    };
    map.center_on(clicked, click_zoom(zoom, map.zoom()));

    let kind: WorkoutKind = args.kind.parse()?;
    let extra = match kind {
        WorkoutKind::Running => args.cadence,
        WorkoutKind::Cycling => args.elevation,
    };
    let form = WorkoutForm {
        kind: args.kind,
        distance: args.distance,
        duration: args.duration,
        cadence_or_elevation: extra.unwrap_or_default(),
    };

    let workout = session.log_form(&form, clicked)?;
    tracing::debug!("Logged workout {} ({})", workout.id(), workout.kind());

    map.render_marker(workout.coordinates(), &marker_label(&workout));

    if output.is_json() {
        output.result(AddOutput {
            workout: WorkoutSummary::from(&workout),
            stored_count: session.len(),
        })?;
    } else {
        map.flush(output);
        output.success(format!("Logged {}", workout.title()));
        output.table(vec![WorkoutRow::from(&workout)]);
    }

    Ok(())
}
