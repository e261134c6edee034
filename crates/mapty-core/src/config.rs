use crate::error::{MaptyError, Result};
use crate::models::{Coordinates, DEFAULT_MAP_ZOOM};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Highest zoom level the tile layer serves
pub const MAX_MAP_ZOOM: u8 = 19;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Mapty
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// File backing the key-value store
    pub storage_path: ConfigValue<PathBuf>,
    /// Key holding the serialized workouts
    pub storage_key: ConfigValue<String>,
    pub map_zoom: ConfigValue<u8>,
    /// Position reported as the user's location, if any
    pub location: ConfigValue<Option<Coordinates>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            storage_path: ConfigValue::new(
                PathBuf::from(".mapty").join("storage.json"),
                ConfigSource::Default,
            ),
            storage_key: ConfigValue::new("workouts".to_string(), ConfigSource::Default),
            map_zoom: ConfigValue::new(DEFAULT_MAP_ZOOM, ConfigSource::Default),
            location: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| MaptyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| MaptyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(storage_path) = file_config.storage_path {
            self.storage_path.update(storage_path, ConfigSource::File);
        }

        if let Some(storage_key) = file_config.storage_key {
            self.storage_key.update(storage_key, ConfigSource::File);
        }

        if let Some(map_zoom) = file_config.map_zoom {
            self.map_zoom.update(check_zoom(map_zoom)?, ConfigSource::File);
        }

        if let Some(location) = file_config.location {
            self.location.update(Some(location), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // MAPTY_STORAGE_PATH
        if let Ok(path) = env::var("MAPTY_STORAGE_PATH") {
            self.storage_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        // MAPTY_STORAGE_KEY
        if let Ok(key) = env::var("MAPTY_STORAGE_KEY") {
            if key.trim().is_empty() {
                tracing::warn!("Ignoring empty MAPTY_STORAGE_KEY");
            } else {
                self.storage_key.update(key, ConfigSource::Environment);
            }
        }

        // MAPTY_MAP_ZOOM
        if let Ok(zoom_str) = env::var("MAPTY_MAP_ZOOM") {
            match parse_zoom(&zoom_str) {
                Ok(zoom) => self.map_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid MAPTY_MAP_ZOOM value '{}': expected integer between 0 and {}",
                    zoom_str,
                    MAX_MAP_ZOOM
                ),
            }
        }

        // MAPTY_LOCATION
        if let Ok(location_str) = env::var("MAPTY_LOCATION") {
            match parse_location(&location_str) {
                Ok(location) => self.location.update(Some(location), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid MAPTY_LOCATION value '{}': expected 'lat,lng'",
                    location_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(storage_path) = overrides.storage_path {
            self.storage_path.update(storage_path, ConfigSource::Cli);
        }

        if let Some(map_zoom) = overrides.map_zoom {
            self.map_zoom.update(map_zoom, ConfigSource::Cli);
        }

        if let Some(location) = overrides.location {
            self.location.update(Some(location), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "storage_path".to_string(),
            (self.storage_path.value.display().to_string(), self.storage_path.source),
        );

        map.insert(
            "storage_key".to_string(),
            (self.storage_key.value.clone(), self.storage_key.source),
        );

        map.insert("map_zoom".to_string(), (self.map_zoom.value.to_string(), self.map_zoom.source));

        let location = match self.location.value {
            Some(coords) => coords.to_string(),
            None => "(not set)".to_string(),
        };
        map.insert("location".to_string(), (location, self.location.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    storage_path: Option<PathBuf>,
    storage_key: Option<String>,
    map_zoom: Option<u8>,
    location: Option<Coordinates>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub storage_path: Option<PathBuf>,
    pub map_zoom: Option<u8>,
    pub location: Option<Coordinates>,
}

/// Parse a `lat,lng` pair
pub fn parse_location(s: &str) -> Result<Coordinates> {
    let invalid = || MaptyError::ConfigInvalid {
        key: "location".to_string(),
        reason: format!("Invalid location: {}. Use 'lat,lng', e.g. '40.7,-74.0'", s),
    };

    let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    if !lat.is_finite() || !lng.is_finite() {
        return Err(invalid());
    }

    Ok(Coordinates::new(lat, lng))
}

/// Parse a map zoom level
pub fn parse_zoom(s: &str) -> Result<u8> {
    let zoom = s.trim().parse::<u8>().map_err(|_| MaptyError::ConfigInvalid {
        key: "map_zoom".to_string(),
        reason: format!("Invalid zoom level: {}", s),
    })?;
    check_zoom(zoom)
}

fn check_zoom(zoom: u8) -> Result<u8> {
    if zoom > MAX_MAP_ZOOM {
        return Err(MaptyError::ConfigInvalid {
            key: "map_zoom".to_string(),
            reason: format!("Zoom level {} exceeds maximum of {}", zoom, MAX_MAP_ZOOM),
        });
    }
    Ok(zoom)
}
