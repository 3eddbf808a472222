//! Configuration loading and the compile-time marker preset registry.
//!
//! Each preset is a `(name, toml_content)` pair embedded via
//! `include_str!`. Adding a preset requires creating a TOML file in
//! `presets/` and adding a corresponding entry here.

use std::path::Path;

use dist_gen_map_generation_models::config::{MapConfig, MarkerPreset};

use crate::GenerationError;

/// Config file read when no path is given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "dist_gen_map.toml";

/// Number of registered presets. Enforced by a test.
#[cfg(test)]
const EXPECTED_PRESET_COUNT: usize = 3;

/// Embedded TOML preset definitions.
const PRESET_TOMLS: &[(&str, &str)] = &[
    ("classic", include_str!("../presets/classic.toml")),
    ("balanced", include_str!("../presets/balanced.toml")),
    ("bold", include_str!("../presets/bold.toml")),
];

/// Returns all registered marker presets.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_presets() -> Vec<MarkerPreset> {
    PRESET_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse marker preset '{name}': {e}"))
        })
        .collect()
}

/// Looks up a preset by identifier.
#[must_use]
pub fn find_preset(id: &str) -> Option<MarkerPreset> {
    all_presets().into_iter().find(|preset| preset.id == id)
}

/// Parses a configuration document.
///
/// # Errors
///
/// Returns [`GenerationError::Config`] if the TOML is invalid.
pub fn parse_config(toml_str: &str) -> Result<MapConfig, GenerationError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Loads the configuration.
///
/// With an explicit `path`, the file must exist. Without one,
/// [`DEFAULT_CONFIG_PATH`] is read if present and defaults are used
/// otherwise.
///
/// # Errors
///
/// Returns [`GenerationError`] if an explicit file cannot be read or any
/// file read fails to parse.
pub fn load_config(path: Option<&Path>) -> Result<MapConfig, GenerationError> {
    let path = match path {
        Some(path) => path,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if !default_path.exists() {
                log::info!("No {DEFAULT_CONFIG_PATH} found, using default configuration");
                return Ok(MapConfig::default());
            }
            default_path
        }
    };

    log::info!("Loading configuration from {}", path.display());
    let toml_str = std::fs::read_to_string(path)?;
    parse_config(&toml_str)
}
