//! In-memory storage for the active session.

use mapty_core::error::Result;
use mapty_core::models::{Workout, WorkoutId};
use mapty_core::ports::KeyValueStore;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Ordered, append-only collection of the session's workouts
///
/// `index` maps each id to the position of its first workout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    index: HashMap<WorkoutId, usize>,
}

impl WorkoutStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store wholesale from a restored sequence
    pub fn from_workouts(workouts: Vec<Workout>) -> Self {
        let mut store = Self { workouts: Vec::with_capacity(workouts.len()), index: HashMap::new() };
        for workout in workouts {
            store.add(workout);
        }
        store
    }

    /// Append a workout at the end
    pub fn add(&mut self, workout: Workout) {
        let position = self.workouts.len();
        match self.index.entry(workout.id().clone()) {
            Entry::Occupied(_) => tracing::warn!(
                "Workout id {} is already in the store; lookups will resolve to the earlier workout",
                workout.id()
            ),
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
        self.workouts.push(workout);
    }

    /// All workouts in insertion order
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    /// Find the first workout with the given id
    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.index.get(id).map(|&position| &self.workouts[position])
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Remove every workout
    pub fn clear(&mut self) {
        self.workouts.clear();
        self.index.clear();
    }
}

/// In-memory implementation of KeyValueStore
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Create a new in-memory key-value store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
