//! Config loading, saving, validation, and presets.

use std::path::Path;

use ps_project::SimConfig;

use crate::error::{AppError, AppResult};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &["pendulum", "pendulum-pd", "cart-pole"];

/// Load a config from YAML or JSON (chosen by extension) and validate it.
pub fn load_config(path: &Path) -> AppResult<SimConfig> {
    if !path.exists() {
        return Err(AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        });
    }
    Ok(ps_project::load_config(path)?)
}

/// Save a config as JSON for `.json` paths, YAML otherwise.
pub fn save_config(path: &Path, config: &SimConfig) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => ps_project::save_json(path, config)?,
        _ => ps_project::save_yaml(path, config)?,
    }
    Ok(())
}

/// Validated YAML text of a config.
pub fn render_yaml(config: &SimConfig) -> AppResult<String> {
    Ok(ps_project::to_yaml(config)?)
}

pub fn validate_config(config: &SimConfig) -> AppResult<()> {
    Ok(ps_project::validate_config(config)?)
}

pub fn preset(name: &str) -> AppResult<SimConfig> {
    match name {
        "pendulum" => Ok(SimConfig::pendulum_default()),
        "pendulum-pd" => Ok(SimConfig::pendulum_pd()),
        "cart-pole" => Ok(SimConfig::cart_pole_default()),
        other => Err(AppError::UnknownPreset(other.to_string())),
    }
}
