#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Substation generation aggregation and legend scaling.
//!
//! Loads a collection of distributed generation locations and a
//! collection of substations, sums the connected capacity per
//! substation, and derives the marker radii, colors, and legend
//! breakpoints a map renderer needs to draw them.

pub mod aggregate;
pub mod coerce;
pub mod config;
pub mod export;
pub mod extent;
pub mod fetchers;
pub mod ingest;
pub mod pipeline;
pub mod scale;
pub mod style;
pub mod summary;

use strum_macros::Display;
use thiserror::Error;

/// Which of the two input collections an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SourceKind {
    /// Distributed generation locations.
    Locations,
    /// Substations.
    Substations,
}

/// Errors that can occur while loading or exporting map data.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A source collection could not be fetched.
    #[error("{source_kind} data failed to load: {message}")]
    DataUnavailable {
        /// Which collection failed.
        source_kind: SourceKind,
        /// Description of the failure.
        message: String,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Structurally invalid input.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
