//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use mapty_core::config::{parse_location, CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up when `--config` is not given
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".mapty").join("config.toml")
}

/// Load layered configuration: defaults, then file, then environment
pub fn load_config(explicit: Option<&Path>) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match explicit {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                config.load_from_file(&path).context("Failed to load configuration file")?
            } else {
                config
            }
        }
    };

    Ok(config.load_from_env())
}

/// Load layered configuration with the global CLI overrides applied
pub fn load_config_with_overrides(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = load_config(cli.config.as_deref())?;

    let location = cli.location.as_deref().map(parse_location).transpose()?;
    config.update_from_cli(CliConfigOverrides {
        storage_path: cli.storage_file.clone(),
        map_zoom: None,
        location,
    });

    Ok(config)
}
