use chrono::{DateTime, Utc};
use mapty_core::config::ConfigSource;
use mapty_core::models::{Workout, WorkoutDetails, WorkoutKind};
use serde::Serialize;
use tabled::Tabled;

/// A workout as rendered in JSON output
#[derive(Debug, Serialize)]
pub struct WorkoutSummary {
    pub id: String,
    pub kind: WorkoutKind,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub coordinates: [f64; 2],
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_min_per_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_km_per_h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain_m: Option<f64>,
}

impl From<&Workout> for WorkoutSummary {
    fn from(workout: &Workout) -> Self {
        let (pace, cadence, speed, elevation) = match *workout.details() {
            WorkoutDetails::Running { cadence, pace } => (Some(pace), Some(cadence), None, None),
            WorkoutDetails::Cycling { elevation_gain, speed } => {
                (None, None, Some(speed), Some(elevation_gain))
            }
        };

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            title: workout.title().to_string(),
            created_at: workout.created_at(),
            coordinates: workout.coordinates().into(),
            distance_km: workout.distance(),
            duration_min: workout.duration(),
            pace_min_per_km: pace,
            cadence_spm: cadence,
            speed_km_per_h: speed,
            elevation_gain_m: elevation,
        }
    }
}

/// A workout as a row of the human-readable list
#[derive(Debug, Tabled)]
pub struct WorkoutRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Workout")]
    pub title: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
    #[tabled(rename = "Pace / Speed")]
    pub metric: String,
    #[tabled(rename = "Cadence / Elevation")]
    pub extra: String,
}

impl From<&Workout> for WorkoutRow {
    fn from(workout: &Workout) -> Self {
        let icon = match workout.kind() {
            WorkoutKind::Running => "🏃",
            WorkoutKind::Cycling => "🚴‍♀️",
        };
        let metric = workout.metric();
        let extra = match *workout.details() {
            WorkoutDetails::Running { cadence, .. } => format!("🦶🏼 {} spm", cadence),
            WorkoutDetails::Cycling { elevation_gain, .. } => format!("⛰ {} m", elevation_gain),
        };

        Self {
            id: workout.id().to_string(),
            title: workout.title().to_string(),
            distance: format!("{} {} km", icon, workout.distance()),
            duration: format!("⏱ {} min", workout.duration()),
            metric: format!("⚡️ {} {}", metric.value, metric.unit),
            extra,
        }
    }
}

/// Output for add command
#[derive(Debug, Serialize)]
pub struct AddOutput {
    pub workout: WorkoutSummary,
    pub stored_count: usize,
}

/// Output for list command
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub workouts: Vec<WorkoutSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Output for show command
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub workout: WorkoutSummary,
    pub zoom: u8,
}

/// Output for status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub config: Vec<ConfigEntry>,
    pub location_available: bool,
    pub workout_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapty_core::models::Coordinates;

    #[test]
    fn test_running_summary_omits_cycling_fields() {
        let run = Workout::running(Coordinates::new(40.7, -74.0), 5.0, 25.0, 180.0);
        let json = serde_json::to_value(WorkoutSummary::from(&run)).unwrap();

        assert_eq!(json["kind"], "running");
        assert_eq!(json["pace_min_per_km"], 5.0);
        assert_eq!(json["cadence_spm"], 180.0);
        assert!(json.get("speed_km_per_h").is_none());
        assert!(json.get("elevation_gain_m").is_none());
    }

    #[test]
    fn test_cycling_row() {
        let ride = Workout::cycling(Coordinates::new(40.7, -74.0), 30.0, 90.0, -12.0);
        let row = WorkoutRow::from(&ride);

        assert_eq!(row.metric, "⚡️ 0.33 km/h");
        assert_eq!(row.extra, "⛰ -12 m");
        assert!(row.distance.ends_with("30 km"));
    }
}
