//! TOML configuration schema for the map toolchain.
//!
//! Every section has defaults matching the published map, so an empty
//! file (or no file at all) yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Where the two feature collections come from.
    pub sources: SourcesConfig,
    /// Marker radius scaling.
    pub markers: MarkerScaleConfig,
    /// Marker colors.
    pub palette: PaletteConfig,
    /// Export destination.
    pub output: OutputConfig,
}

/// The two input feature collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Distributed generation locations.
    pub locations: SourceConfig,
    /// Substations.
    pub substations: SourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            locations: SourceConfig::File {
                path: "data/distributed_generation.json".to_string(),
            },
            substations: SourceConfig::File {
                path: "data/substations.json".to_string(),
            },
        }
    }
}

/// How to fetch a `GeoJSON` `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// A file on the local filesystem.
    File {
        /// Path to the `GeoJSON` file.
        path: String,
    },
    /// Any URL that returns a `GeoJSON` `FeatureCollection` directly.
    GeojsonUrl {
        /// Full URL of the collection.
        url: String,
    },
}

impl SourceConfig {
    /// Returns the path or URL, for log messages.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::File { path } => path,
            Self::GeojsonUrl { url } => url,
        }
    }
}

/// Area-preserving marker scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerScaleConfig {
    /// Multiplier applied to generation location radii.
    pub location_scale: f64,
    /// Multiplier applied to substation radii.
    pub substation_scale: f64,
    /// Radius used for zero-valued markers and as the floor for all others.
    pub minimum_radius: f64,
}

impl Default for MarkerScaleConfig {
    fn default() -> Self {
        Self {
            location_scale: 1.5,
            substation_scale: 0.8,
            minimum_radius: 3.0,
        }
    }
}

/// Marker colors as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Substations with connected generation.
    pub substation: String,
    /// Substations without connected generation.
    pub substation_empty: String,
    /// Solar and dual solar/wind locations.
    pub solar: String,
    /// Biomass locations.
    pub biomass: String,
    /// Wind locations.
    pub wind: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            substation: "#5067af".to_string(),
            substation_empty: "#DFDFDF".to_string(),
            solar: "#ff7800".to_string(),
            biomass: "#5cb572".to_string(),
            wind: "#b383c4".to_string(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the exported files are written to.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "data/generated".to_string(),
        }
    }
}

/// A named pair of marker scale factors, embedded as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPreset {
    /// Unique preset identifier (e.g. `"classic"`).
    pub id: String,
    /// Human-readable description.
    pub name: String,
    /// Multiplier for generation location radii.
    pub location_scale: f64,
    /// Multiplier for substation radii.
    pub substation_scale: f64,
}

impl MarkerPreset {
    /// Applies this preset's scale factors, keeping the minimum radius.
    #[must_use]
    pub const fn apply(&self, markers: MarkerScaleConfig) -> MarkerScaleConfig {
        MarkerScaleConfig {
            location_scale: self.location_scale,
            substation_scale: self.substation_scale,
            minimum_radius: markers.minimum_radius,
        }
    }
}
