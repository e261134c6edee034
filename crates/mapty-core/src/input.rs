//! Form input parsing and validation.
//!
//! Raw form strings become a [`WorkoutInput`] only after every field is
//! parsed and checked, so no invalid workout can ever be constructed from
//! user input.

use chrono::{DateTime, Utc};

use crate::error::{MaptyError, Result};
use crate::models::{round2, Coordinates, Workout, WorkoutKind};

/// Raw values as collected by the workout form
#[derive(Debug, Clone, Default)]
pub struct WorkoutForm {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    /// Cadence for running, elevation gain for cycling
    pub cadence_or_elevation: String,
}

/// Validated workout input, ready to become a [`Workout`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    distance: f64,
    duration: f64,
    extra: Extra,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Extra {
    Cadence(f64),
    ElevationGain(f64),
}

impl WorkoutInput {
    /// Parse and validate a submitted form
    pub fn parse(form: &WorkoutForm) -> Result<Self> {
        let kind: WorkoutKind = form.kind.parse()?;
        let distance = parse_number("distance", &form.distance)?;
        let duration = parse_number("duration", &form.duration)?;

        match kind {
            WorkoutKind::Running => {
                let cadence = parse_number("cadence", &form.cadence_or_elevation)?;
                Self::running(distance, duration, cadence)
            }
            WorkoutKind::Cycling => {
                let elevation = parse_number("elevation_gain", &form.cadence_or_elevation)?;
                Self::cycling(distance, duration, elevation)
            }
        }
    }

    pub fn running(distance: f64, duration: f64, cadence: f64) -> Result<Self> {
        require_positive("distance", distance)?;
        require_positive("duration", duration)?;
        require_positive("cadence", cadence)?;
        require_derived("pace", round2(duration / distance))?;
        Ok(Self { distance, duration, extra: Extra::Cadence(cadence) })
    }

    /// Elevation gain may be zero or negative but must be finite
    pub fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Result<Self> {
        require_positive("distance", distance)?;
        require_positive("duration", duration)?;
        require_finite("elevation_gain", elevation_gain)?;
        require_derived("speed", round2(distance / duration))?;
        Ok(Self { distance, duration, extra: Extra::ElevationGain(elevation_gain) })
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.extra {
            Extra::Cadence(_) => WorkoutKind::Running,
            Extra::ElevationGain(_) => WorkoutKind::Cycling,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Build the workout at the clicked location
    pub fn into_workout(self, coordinates: Coordinates, created_at: DateTime<Utc>) -> Workout {
        match self.extra {
            Extra::Cadence(cadence) => {
                Workout::running_at(created_at, coordinates, self.distance, self.duration, cadence)
            }
            Extra::ElevationGain(elevation) => {
                Workout::cycling_at(created_at, coordinates, self.distance, self.duration, elevation)
            }
        }
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MaptyError::invalid_input(field, "value is required"));
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| MaptyError::invalid_input(field, format!("'{}' is not a number", trimmed)))
}

fn require_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MaptyError::invalid_input(field, "must be a finite number"));
    }
    Ok(())
}

/// The derived metric has to survive persistence, which has no encoding for
/// infinity
fn require_derived(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MaptyError::invalid_input(
            field,
            "distance and duration are too far apart to derive a finite value",
        ));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(MaptyError::invalid_input(field, "must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(kind: &str, distance: &str, duration: &str, extra: &str) -> WorkoutForm {
        WorkoutForm {
            kind: kind.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence_or_elevation: extra.to_string(),
        }
    }

    fn rejected_field(result: Result<WorkoutInput>) -> String {
        match result {
            Err(MaptyError::InvalidWorkoutInput { field, .. }) => field,
            other => panic!("expected InvalidWorkoutInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_running_form() {
        let input = WorkoutInput::parse(&form("running", "5", " 25 ", "180")).unwrap();
        assert_eq!(input.kind(), WorkoutKind::Running);
        assert_eq!(input.distance(), 5.0);
        assert_eq!(input.duration(), 25.0);
    }

    #[test]
    fn test_parse_cycling_allows_non_positive_elevation() {
        let flat = WorkoutInput::parse(&form("cycling", "20", "60", "0")).unwrap();
        assert_eq!(flat.kind(), WorkoutKind::Cycling);

        let downhill = WorkoutInput::parse(&form("Cycling", "20", "60", "-35.5"));
        assert!(downhill.is_ok());
    }

    #[test]
    fn test_rejects_bad_distance() {
        for bad in ["0", "-5", "NaN", "inf", "", "abc"] {
            let result = WorkoutInput::parse(&form("running", bad, "25", "180"));
            assert_eq!(rejected_field(result), "distance", "input {:?}", bad);
        }
    }

    #[test]
    fn test_rejects_bad_duration_and_cadence() {
        assert_eq!(
            rejected_field(WorkoutInput::parse(&form("running", "5", "0", "180"))),
            "duration"
        );
        assert_eq!(
            rejected_field(WorkoutInput::parse(&form("running", "5", "25", "-1"))),
            "cadence"
        );
        assert_eq!(
            rejected_field(WorkoutInput::parse(&form("cycling", "5", "25", "NaN"))),
            "elevation_gain"
        );
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert_eq!(rejected_field(WorkoutInput::parse(&form("rowing", "5", "25", "1"))), "kind");
    }

    #[test]
    fn test_checked_constructors() {
        assert!(WorkoutInput::running(f64::NAN, 25.0, 180.0).is_err());
        assert!(WorkoutInput::cycling(10.0, f64::INFINITY, 0.0).is_err());
        assert!(WorkoutInput::cycling(10.0, 30.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_metric() {
        let speed = WorkoutInput::parse(&form("cycling", "1e300", "1e-10", "0"));
        assert_eq!(rejected_field(speed), "speed");

        let pace = WorkoutInput::parse(&form("running", "1e-10", "1e300", "180"));
        assert_eq!(rejected_field(pace), "pace");

        // Finite ratio, but too large to scale for rounding
        assert_eq!(rejected_field(WorkoutInput::cycling(1e307, 1.0, 0.0)), "speed");

        assert!(WorkoutInput::cycling(1e300, 1e300, 0.0).is_ok());
        assert!(WorkoutInput::running(1e-3, 1e3, 180.0).is_ok());
    }

    #[test]
    fn test_into_workout() {
        let at = Utc::now();
        let coords = Coordinates::new(40.7, -74.0);
        let workout = WorkoutInput::running(5.0, 25.0, 180.0).unwrap().into_workout(coords, at);

        assert_eq!(workout.pace(), Some(5.0));
        assert_eq!(workout.coordinates(), coords);
        assert_eq!(workout.created_at(), at);
    }
}
