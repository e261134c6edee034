use anyhow::{Context, Result};
use mapty_core::config::LayeredConfig;
use mapty_store::{FileKeyValueStore, RestoreReport, WorkoutSession};

use crate::output::OutputWriter;

pub type Session = WorkoutSession<FileKeyValueStore>;

/// Open the configured storage file without restoring anything
pub fn open_session(config: &LayeredConfig) -> Result<Session> {
    let path = &config.storage_path.value;
    let kv = FileKeyValueStore::open(path)
        .with_context(|| format!("Failed to open storage file {}", path.display()))?;
    Ok(WorkoutSession::new(kv, config.storage_key.value.clone()))
}

/// Open the storage file and restore the previous session.
///
/// Corrupt persisted state is reported as a warning and leaves the session
/// empty.
pub fn restore_session(
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<(Session, RestoreReport)> {
    let mut session = open_session(config)?;
    let report = session.restore().context("Failed to read stored workouts")?;

    if let Some(ref warning) = report.warning {
        output.warning(format!(
            "{}. Starting with an empty list; the unreadable data was kept under '{}'",
            warning,
            session.backup_key()
        ));
    }

    Ok((session, report))
}
