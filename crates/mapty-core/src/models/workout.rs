//! Workout record types.
//!
//! A [`Workout`] carries the fields shared by every session plus a
//! [`WorkoutDetails`] variant holding the kind-specific input and its derived
//! metric. Because the kind is the variant, a workout always has exactly one
//! kind and exactly the metric that belongs to it.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Coordinates;
use crate::error::{MaptyError, Result};

/// Number of trailing timestamp digits kept in an id
const ID_DIGITS: usize = 10;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Workout identifier derived from the creation timestamp
///
/// The last ten digits of the millisecond Unix timestamp. Two workouts created
/// within the same millisecond share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(ID_DIGITS);
        Self(millis[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Tag written to persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Variant name used in titles
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkoutKind {
    type Err = MaptyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(MaptyError::invalid_input(
                "kind",
                format!("unknown workout kind '{}'. Use running or cycling", other),
            )),
        }
    }
}

/// Kind-specific input and derived metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Meters, may be zero or negative
        elevation_gain: f64,
        /// `distance / duration`, labelled km/h even though duration is in
        /// minutes
        speed: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A derived metric ready for display
///
/// Speed is labelled `km/h`, but its value is `distance / duration` with
/// duration in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// A logged workout session
///
/// Immutable once constructed; every derived field is computed by the
/// constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    title: String,
    details: WorkoutDetails,
}

/// Already-parsed persisted fields used to rebuild a workout
#[derive(Debug, Clone)]
pub struct RestoredWorkout {
    pub id: WorkoutId,
    pub created_at: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub distance: f64,
    pub duration: f64,
    pub title: String,
    pub details: WorkoutDetails,
}

impl Workout {
    /// Create a running workout now.
    ///
    /// `distance`, `duration` and `cadence` must be finite and positive; use
    /// [`crate::input::WorkoutInput`] to get there from raw input.
    pub fn running(coordinates: Coordinates, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::running_at(Utc::now(), coordinates, distance, duration, cadence)
    }

    pub fn running_at(
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let pace = round2(duration / distance);
        let details = WorkoutDetails::Running { cadence, pace };
        Self::with_details(created_at, coordinates, distance, duration, details)
    }

    /// Create a cycling workout now.
    ///
    /// `distance` and `duration` must be finite and positive, `elevation_gain`
    /// finite.
    pub fn cycling(
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::cycling_at(Utc::now(), coordinates, distance, duration, elevation_gain)
    }

    pub fn cycling_at(
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let speed = round2(distance / duration);
        let details = WorkoutDetails::Cycling { elevation_gain, speed };
        Self::with_details(created_at, coordinates, distance, duration, details)
    }

    fn with_details(
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        details: WorkoutDetails,
    ) -> Self {
        let local_date = created_at.with_timezone(&Local).date_naive();
        Self {
            id: WorkoutId::from_timestamp(created_at),
            created_at,
            coordinates,
            distance,
            duration,
            title: format_title(details.kind(), local_date),
            details,
        }
    }

    /// Rebuild a workout from persisted fields without re-deriving anything
    pub fn restore(parts: RestoredWorkout) -> Self {
        Self {
            id: parts.id,
            created_at: parts.created_at,
            coordinates: parts.coordinates,
            distance: parts.distance,
            duration: parts.duration,
            title: parts.title,
            details: parts.details,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Kilometers
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Minutes
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn pace(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { pace, .. } => Some(pace),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed, .. } => Some(speed),
            WorkoutDetails::Running { .. } => None,
        }
    }

    pub fn metric(&self) -> Metric {
        match self.details {
            WorkoutDetails::Running { pace, .. } => Metric { name: "pace", value: pace, unit: "min/km" },
            WorkoutDetails::Cycling { speed, .. } => Metric { name: "speed", value: speed, unit: "km/h" },
        }
    }
}

/// Title shown on markers and list entries, e.g. `Running on October 14`
pub fn format_title(kind: WorkoutKind, date: NaiveDate) -> String {
    format!("{} on {}", kind, date.format("%B %-d"))
}
