//! Map presentation helpers shared by every map view.

use super::{Workout, WorkoutKind};

/// Zoom level used when the map first loads and when jumping to a workout
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Popup label for a workout marker
pub fn marker_label(workout: &Workout) -> String {
    let icon = match workout.kind() {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    };
    format!("{} {}", icon, workout.title())
}

/// Zoom applied when a map click opens the workout form.
///
/// Never zooms out past the default, but keeps a closer zoom the user chose.
pub fn click_zoom(default_zoom: u8, current_zoom: u8) -> u8 {
    default_zoom.max(current_zoom)
}
