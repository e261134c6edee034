use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mapty - log your running and cycling workouts on the map
#[derive(Parser, Debug)]
#[command(name = "mapty")]
#[command(about = "Log running and cycling workouts at map locations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .mapty/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Storage file holding the persisted workouts
    #[arg(long, global = true, value_name = "PATH")]
    pub storage_file: Option<PathBuf>,

    /// Current location as 'lat,lng'
    #[arg(long, global = true, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub location: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new workout at a map location
    Add(AddArgs),

    /// List logged workouts, newest first
    List,

    /// Jump the map to a logged workout
    Show(ShowArgs),

    /// Delete every logged workout
    Reset(ResetArgs),

    /// Show configuration, location and storage status
    Status,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Workout type (running or cycling)
    pub kind: String,

    /// Distance in kilometers
    #[arg(long, allow_hyphen_values = true)]
    pub distance: String,

    /// Duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: String,

    /// Cadence in steps per minute (running)
    #[arg(long, allow_hyphen_values = true)]
    pub cadence: Option<String>,

    /// Elevation gain in meters (cycling)
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<String>,

    /// Latitude of the clicked map point (defaults to the current location)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the clicked map point
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Workout id as shown by `mapty list`
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct ResetArgs {
    /// Skip the confirmation notice
    #[arg(long)]
    pub yes: bool,
}
