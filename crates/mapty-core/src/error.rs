//! Error types for Mapty

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaptyError {
    // Input errors
    #[error("Invalid {field}: {reason}")]
    InvalidWorkoutInput { field: String, reason: String },

    // Location errors
    #[error("Location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    // Persistence errors
    #[error("Persisted workouts are corrupt: {reason}")]
    CorruptPersistedState { reason: String },

    #[error("Workout not found: {id}")]
    WorkoutNotFound { id: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MaptyError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidWorkoutInput { field: field.into(), reason: reason.into() }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptPersistedState { reason: reason.into() }
    }

    /// Whether the caller can carry on with an empty session after this error
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, Self::CorruptPersistedState { .. })
    }
}

pub type Result<T> = std::result::Result<T, MaptyError>;
