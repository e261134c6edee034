//! Status command implementation

use crate::map::StaticLocationProvider;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, StatusOutput};
use crate::storage::restore_session;
use anyhow::Result;
use mapty_core::config::LayeredConfig;
use mapty_core::ports::LocationProvider;

pub async fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut entries: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry { key, value, source })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let provider = StaticLocationProvider::new(config.location.value);
    let location = provider.current_location().await;

    let (session, report) = restore_session(config, output)?;

    if output.is_json() {
        return output.result(StatusOutput {
            config: entries,
            location_available: location.is_ok(),
            workout_count: session.len(),
            warning: report.warning.map(|w| w.to_string()),
        });
    }

    output.section("Configuration");
    for entry in &entries {
        output.kv(&entry.key, format!("{} ({:?})", entry.value, entry.source));
    }

    output.section("Location");
    match location {
        Ok(coords) => output.success(format!("Current location: {}", coords)),
        Err(err) => output.warning(format!("{}. Logging new workouts is disabled", err)),
    }

    output.section("Storage");
    output.kv("Workouts", session.len());

    Ok(())
}
