//! Persistence codec for the workout list.
//!
//! Workouts are written as a JSON array of flat records. The key-value store
//! keeps only plain text, so every record carries its `kind` tag and decoding
//! dispatches on that tag to rebuild a correctly typed [`Workout`]:
//!
//! ```json
//! [{"kind":"running","id":"0000123456","createdAt":"2024-10-14T09:30:00Z",
//!   "coordinates":[40.7,-74.0],"distance":5.0,"duration":25.0,
//!   "title":"Running on October 14","cadence":180.0,"pace":5.0}]
//! ```
//!
//! A blob that fails to parse, or holds a record with an unknown kind, is
//! rejected as a whole.

use chrono::{DateTime, Utc};
use mapty_core::error::{MaptyError, Result};
use mapty_core::models::{
    Coordinates, RestoredWorkout, Workout, WorkoutDetails, WorkoutId, WorkoutKind,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunningRecord {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    title: String,
    cadence: f64,
    pace: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CyclingRecord {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    title: String,
    elevation_gain: f64,
    speed: f64,
}

/// Tagged record as written; `kind` is emitted ahead of the record fields
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum WireRecord {
    Running(RunningRecord),
    Cycling(CyclingRecord),
}

impl From<&Workout> for WireRecord {
    fn from(workout: &Workout) -> Self {
        let id = workout.id().clone();
        let created_at = workout.created_at();
        let coordinates = workout.coordinates();
        let distance = workout.distance();
        let duration = workout.duration();
        let title = workout.title().to_string();

        match *workout.details() {
            WorkoutDetails::Running { cadence, pace } => WireRecord::Running(RunningRecord {
                id,
                created_at,
                coordinates,
                distance,
                duration,
                title,
                cadence,
                pace,
            }),
            WorkoutDetails::Cycling { elevation_gain, speed } => {
                WireRecord::Cycling(CyclingRecord {
                    id,
                    created_at,
                    coordinates,
                    distance,
                    duration,
                    title,
                    elevation_gain,
                    speed,
                })
            }
        }
    }
}

impl From<RunningRecord> for Workout {
    fn from(record: RunningRecord) -> Self {
        Workout::restore(RestoredWorkout {
            id: record.id,
            created_at: record.created_at,
            coordinates: record.coordinates,
            distance: record.distance,
            duration: record.duration,
            title: record.title,
            details: WorkoutDetails::Running { cadence: record.cadence, pace: record.pace },
        })
    }
}

impl From<CyclingRecord> for Workout {
    fn from(record: CyclingRecord) -> Self {
        Workout::restore(RestoredWorkout {
            id: record.id,
            created_at: record.created_at,
            coordinates: record.coordinates,
            distance: record.distance,
            duration: record.duration,
            title: record.title,
            details: WorkoutDetails::Cycling {
                elevation_gain: record.elevation_gain,
                speed: record.speed,
            },
        })
    }
}

/// Serialize the full ordered workout list.
///
/// Fails on any non-finite number, which JSON would silently turn into `null`
/// and make the whole blob undecodable.
pub fn encode(workouts: &[Workout]) -> Result<String> {
    for (index, workout) in workouts.iter().enumerate() {
        if let Some(field) = non_finite_field(workout) {
            return Err(MaptyError::Serialization(format!(
                "workout {} ({}) has a non-finite {}",
                index,
                workout.id(),
                field
            )));
        }
    }

    let records: Vec<WireRecord> = workouts.iter().map(WireRecord::from).collect();
    serde_json::to_string(&records).map_err(|e| MaptyError::Serialization(e.to_string()))
}

fn non_finite_field(workout: &Workout) -> Option<&'static str> {
    let coordinates = workout.coordinates();
    let (extra_name, extra, metric_name, metric) = match *workout.details() {
        WorkoutDetails::Running { cadence, pace } => ("cadence", cadence, "pace", pace),
        WorkoutDetails::Cycling { elevation_gain, speed } => {
            ("elevationGain", elevation_gain, "speed", speed)
        }
    };

    [
        ("coordinates", coordinates.lat),
        ("coordinates", coordinates.lng),
        ("distance", workout.distance()),
        ("duration", workout.duration()),
        (extra_name, extra),
        (metric_name, metric),
    ]
    .into_iter()
    .find(|(_, value)| !value.is_finite())
    .map(|(name, _)| name)
}

/// Restore the ordered workout list.
///
/// `None` and blank text mean there was no earlier session and yield an empty
/// list.
pub fn decode(blob: Option<&str>) -> Result<Vec<Workout>> {
    let Some(text) = blob.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(Vec::new());
    };

    let values: Vec<Value> = serde_json::from_str(text)
        .map_err(|e| MaptyError::corrupt(format!("expected an array of workout records: {}", e)))?;

    let workouts = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| decode_record(index, value))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Decoded {} persisted workouts", workouts.len());
    Ok(workouts)
}

fn decode_record(index: usize, value: Value) -> Result<Workout> {
    let kind = match value.get("kind") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => {
            return Err(MaptyError::corrupt(format!(
                "record {} has a non-string kind: {}",
                index, other
            )))
        }
        None => return Err(MaptyError::corrupt(format!("record {} has no kind", index))),
    };

    let invalid = |e: serde_json::Error| {
        MaptyError::corrupt(format!("record {} is not a valid {} workout: {}", index, kind, e))
    };

    match kind.as_str() {
        k if k == WorkoutKind::Running.as_str() => {
            let record: RunningRecord = serde_json::from_value(value).map_err(invalid)?;
            Ok(record.into())
        }
        k if k == WorkoutKind::Cycling.as_str() => {
            let record: CyclingRecord = serde_json::from_value(value).map_err(invalid)?;
            Ok(record.into())
        }
        other => Err(MaptyError::corrupt(format!(
            "record {} has unknown kind '{}'",
            index, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<Workout> {
        let coords = Coordinates::new(40.7, -74.0);
        let first = Utc.with_ymd_and_hms(2024, 10, 14, 9, 30, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 10, 14, 18, 5, 12).unwrap();
        vec![
            Workout::running_at(first, coords, 5.0, 25.0, 180.0),
            Workout::cycling_at(second, coords, 20.0, 60.0, 150.0),
        ]
    }

    #[test]
    fn test_encode_writes_kind_and_metric() {
        let blob = encode(&sample()).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&blob).unwrap();

        assert_eq!(parsed[0]["kind"], "running");
        assert_eq!(parsed[0]["pace"], 5.0);
        assert_eq!(parsed[0]["cadence"], 180.0);
        assert!(parsed[0].get("speed").is_none());
        assert_eq!(parsed[0]["coordinates"], serde_json::json!([40.7, -74.0]));

        assert_eq!(parsed[1]["kind"], "cycling");
        assert_eq!(parsed[1]["elevationGain"], 150.0);
        assert_eq!(parsed[1]["speed"], 0.33);
        assert!(parsed[1].get("pace").is_none());
    }

    #[test]
    fn test_encode_rejects_non_finite_values() {
        let at = Utc.with_ymd_and_hms(2024, 10, 14, 9, 30, 0).unwrap();
        let coords = Coordinates::new(40.7, -74.0);
        let mut workouts = sample();
        workouts.push(Workout::cycling_at(at, coords, 1e300, 1e-10, 0.0));

        let err = encode(&workouts).unwrap_err();
        assert!(matches!(err, MaptyError::Serialization(ref msg) if msg.contains("speed")));

        let off_map = Workout::running_at(at, Coordinates::new(f64::NAN, 0.0), 5.0, 25.0, 180.0);
        assert!(encode(&[off_map]).is_err());
    }

    #[test]
    fn test_round_trip() {
        let workouts = sample();
        let blob = encode(&workouts).unwrap();
        let restored = decode(Some(&blob)).unwrap();

        assert_eq!(restored, workouts);
        assert_eq!(restored[0].kind(), WorkoutKind::Running);
        assert_eq!(restored[1].kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn test_absent_or_blank_is_empty() {
        assert!(decode(None).unwrap().is_empty());
        assert!(decode(Some("")).unwrap().is_empty());
        assert!(decode(Some("  \n")).unwrap().is_empty());
        assert!(decode(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_is_corrupt() {
        for blob in ["{not json", "null", r#"{"kind":"running"}"#, "[1, 2]", "[\"running\"]"] {
            let result = decode(Some(blob));
            assert!(
                matches!(result, Err(MaptyError::CorruptPersistedState { .. })),
                "blob {:?} gave {:?}",
                blob,
                result
            );
        }
    }

    #[test]
    fn test_unknown_kind_rejects_whole_blob() {
        let mut records: Vec<Value> = serde_json::from_str(&encode(&sample()).unwrap()).unwrap();
        records[1]["kind"] = Value::from("swimming");
        let blob = serde_json::to_string(&records).unwrap();

        let err = decode(Some(&blob)).unwrap_err();
        assert!(err.to_string().contains("unknown kind 'swimming'"));
    }

    #[test]
    fn test_missing_kind_specific_field_is_corrupt() {
        let mut records: Vec<Value> = serde_json::from_str(&encode(&sample()).unwrap()).unwrap();
        records[0].as_object_mut().unwrap().remove("pace");
        let blob = serde_json::to_string(&records).unwrap();

        assert!(decode(Some(&blob)).unwrap_err().is_corrupt_state());
    }

    #[test]
    fn test_decode_does_not_rederive_metric() {
        let blob = r#"[{"kind":"running","id":"1","createdAt":"2024-10-14T09:30:00Z",
            "coordinates":[1.0,2.0],"distance":5.0,"duration":25.0,
            "title":"Running on October 14","cadence":180.0,"pace":4.2}]"#;

        let restored = decode(Some(blob)).unwrap();
        assert_eq!(restored[0].pace(), Some(4.2));
        assert_eq!(restored[0].title(), "Running on October 14");
    }
}
