//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use mapty_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use mapty_core::models::Coordinates;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 4] =
    ["MAPTY_STORAGE_PATH", "MAPTY_STORAGE_KEY", "MAPTY_MAP_ZOOM", "MAPTY_LOCATION"];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("MAPTY_STORAGE_KEY", "env-workouts");
    env::set_var("MAPTY_MAP_ZOOM", "10");
    env::set_var("MAPTY_LOCATION", "48.85,2.35");

    let file = config_file(
        r#"
storage_key = "file-workouts"
map_zoom = 15
location = [40.7, -74.0]
"#,
    );

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.storage_key.value, "env-workouts");
    assert_eq!(config.storage_key.source, ConfigSource::Environment);
    assert_eq!(config.map_zoom.value, 10);
    assert_eq!(config.location.value, Some(Coordinates::new(48.85, 2.35)));
    assert_eq!(config.location.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("MAPTY_MAP_ZOOM", "very close");
    env::set_var("MAPTY_LOCATION", "somewhere");
    env::set_var("MAPTY_STORAGE_KEY", "   ");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.map_zoom.value, 13);
    assert_eq!(config.map_zoom.source, ConfigSource::Default);
    assert!(config.location.value.is_none());
    assert_eq!(config.storage_key.value, "workouts");

    clear_env();
}

#[test]
#[serial]
fn test_configuration_precedence_order() {
    clear_env();
    env::set_var("MAPTY_STORAGE_PATH", "/tmp/env-storage.json");

    let file = config_file(r#"storage_path = "/tmp/file-storage.json""#);

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.storage_path.value, PathBuf::from("/tmp/env-storage.json"));
    assert_eq!(config.storage_path.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        storage_path: Some(PathBuf::from("/tmp/cli-storage.json")),
        ..Default::default()
    });

    assert_eq!(config.storage_path.value, PathBuf::from("/tmp/cli-storage.json"));
    assert_eq!(config.storage_path.source, ConfigSource::Cli);

    clear_env();
}

#[test]
fn test_invalid_toml_file() {
    let file = config_file("map_zoom = [not valid");

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
fn test_missing_config_file() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/mapty.toml");
    assert!(result.is_err());
}

#[test]
fn test_location_must_be_a_pair() {
    let file = config_file("location = [40.7]");

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}
