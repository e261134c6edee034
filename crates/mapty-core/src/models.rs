pub mod coordinates;
pub mod map;
pub mod workout;

pub use coordinates::Coordinates;
pub use map::{click_zoom, marker_label, DEFAULT_MAP_ZOOM};
pub use workout::{
    round2, Metric, RestoredWorkout, Workout, WorkoutDetails, WorkoutId, WorkoutKind,
};
