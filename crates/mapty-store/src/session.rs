//! Active workout session bound to its persisted key.

use chrono::{DateTime, Utc};
use mapty_core::error::{MaptyError, Result};
use mapty_core::input::{WorkoutForm, WorkoutInput};
use mapty_core::models::{Coordinates, Workout, WorkoutId};
use mapty_core::ports::KeyValueStore;

use crate::codec;
use crate::memory::WorkoutStore;

/// Outcome of restoring the previous session
#[derive(Debug)]
pub struct RestoreReport {
    /// Number of workouts restored
    pub restored: usize,
    /// Set when the persisted blob was corrupt and nothing was restored
    pub warning: Option<MaptyError>,
}

/// The session's workout store and the single key it persists to
///
/// Every mutation rewrites the whole key.
#[derive(Debug)]
pub struct WorkoutSession<K: KeyValueStore> {
    storage: K,
    key: String,
    store: WorkoutStore,
}

impl<K: KeyValueStore> WorkoutSession<K> {
    pub fn new(storage: K, key: impl Into<String>) -> Self {
        Self { storage, key: key.into(), store: WorkoutStore::new() }
    }

    /// Replace the store with the persisted workouts.
    ///
    /// A corrupt blob leaves the store empty, is copied to `{key}.corrupt` for
    /// manual recovery, and is reported as a warning rather than an error.
    pub fn restore(&mut self) -> Result<RestoreReport> {
        let blob = self.storage.get_item(&self.key)?;

        match codec::decode(blob.as_deref()) {
            Ok(workouts) => {
                tracing::debug!("Restored {} workouts from '{}'", workouts.len(), self.key);
                self.store = WorkoutStore::from_workouts(workouts);
                Ok(RestoreReport { restored: self.store.len(), warning: None })
            }
            Err(err) if err.is_corrupt_state() => {
                tracing::warn!("Discarding persisted workouts under '{}': {}", self.key, err);
                self.store = WorkoutStore::new();
                if let Some(raw) = blob {
                    self.storage.set_item(&self.backup_key(), &raw)?;
                }
                Ok(RestoreReport { restored: 0, warning: Some(err) })
            }
            Err(err) => Err(err),
        }
    }

    /// Record a validated workout at `coordinates` and persist the store
    pub fn record(&mut self, input: WorkoutInput, coordinates: Coordinates) -> Result<Workout> {
        self.record_at(input, coordinates, Utc::now())
    }

    pub fn record_at(
        &mut self,
        input: WorkoutInput,
        coordinates: Coordinates,
        created_at: DateTime<Utc>,
    ) -> Result<Workout> {
        let workout = input.into_workout(coordinates, created_at);

        // Write first so a failed write leaves the store untouched
        let mut pending = self.store.all().to_vec();
        pending.push(workout.clone());
        self.persist(&pending)?;

        self.store.add(workout.clone());
        Ok(workout)
    }

    /// Validate a submitted form, then record it
    pub fn log_form(&mut self, form: &WorkoutForm, coordinates: Coordinates) -> Result<Workout> {
        let input = WorkoutInput::parse(form)?;
        self.record(input, coordinates)
    }

    /// Clear the store and forget the persisted workouts
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        self.store.clear();
        Ok(())
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Key that receives a corrupt blob on restore
    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    fn persist(&mut self, workouts: &[Workout]) -> Result<()> {
        let blob = codec::encode(workouts)?;
        self.storage.set_item(&self.key, &blob)?;
        tracing::debug!("Persisted {} workouts to '{}'", workouts.len(), self.key);
        Ok(())
    }
}
