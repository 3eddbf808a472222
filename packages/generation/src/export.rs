//! Writes the aggregated map data as renderer-ready files.
//!
//! Each exported feature keeps its original properties and gains the
//! derived fields the renderer reads: `totalGeneration` on substations,
//! `layer` on locations, and a `marker` style object on both.

use std::path::{Path, PathBuf};

use dist_gen_map_generation_models::{FeatureId, GenerationLocation, Position, Substation};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry};

use crate::GenerationError;
use crate::pipeline::MapData;
use crate::style::{MarkerStyler, group_by_layer};

/// Property added to substations holding the aggregated total.
pub const TOTAL_GENERATION_PROPERTY: &str = "totalGeneration";
/// Property added to locations holding the layer name.
pub const LAYER_PROPERTY: &str = "layer";
/// Property added to every feature holding its marker style.
pub const MARKER_PROPERTY: &str = "marker";

/// Paths of the files written by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct ExportPaths {
    /// Annotated substations.
    pub substations: PathBuf,
    /// Styled generation locations.
    pub locations: PathBuf,
    /// Legend breakpoints and extent.
    pub legend: PathBuf,
}

fn point_geometry(position: Option<Position>) -> Option<Geometry> {
    position.map(|p| Geometry::new(geojson::Value::Point(vec![p.lon, p.lat])))
}

fn geojson_id(feature_id: Option<&FeatureId>) -> Option<Id> {
    match feature_id? {
        FeatureId::String(s) => Some(Id::String(s.clone())),
        FeatureId::Number(n) => Some(Id::Number(n.clone())),
    }
}

/// Builds the substation collection with `totalGeneration` and marker
/// style added to each feature's properties.
///
/// # Errors
///
/// Returns [`GenerationError::Json`] if a marker style cannot be
/// serialized.
pub fn substation_collection(
    substations: &[Substation],
    styler: &MarkerStyler,
) -> Result<FeatureCollection, GenerationError> {
    let features = substations
        .iter()
        .map(|substation| -> Result<Feature, GenerationError> {
            let mut properties = substation.properties.clone();
            properties.insert(
                TOTAL_GENERATION_PROPERTY.to_string(),
                serde_json::Value::from(substation.total_generation_kw),
            );
            properties.insert(
                MARKER_PROPERTY.to_string(),
                serde_json::to_value(styler.substation_style(substation))?,
            );

            Ok(Feature {
                bbox: None,
                geometry: point_geometry(substation.position),
                id: geojson_id(substation.feature_id.as_ref()),
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Builds the location collection with layer and marker style added,
/// grouped in layer drawing order.
///
/// Locations with an unrecognized generation type belong to no layer
/// and are omitted.
///
/// # Errors
///
/// Returns [`GenerationError::Json`] if a marker style cannot be
/// serialized.
pub fn location_collection(
    locations: &[GenerationLocation],
    styler: &MarkerStyler,
) -> Result<FeatureCollection, GenerationError> {
    let mut features = Vec::with_capacity(locations.len());

    for (layer, members) in group_by_layer(locations) {
        log::debug!("Layer {}: {} locations", layer.label(), members.len());

        for location in members {
            let Some(style) = styler.location_style(location) else {
                continue;
            };

            let mut properties = location.properties.clone();
            properties.insert(
                LAYER_PROPERTY.to_string(),
                serde_json::Value::from(layer.to_string()),
            );
            properties.insert(MARKER_PROPERTY.to_string(), serde_json::to_value(style)?);

            features.push(Feature {
                bbox: None,
                geometry: point_geometry(location.position),
                id: geojson_id(location.feature_id.as_ref()),
                properties: Some(properties),
                foreign_members: None,
            });
        }
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Writes `substations.geojson`, `locations.geojson`, and `legend.json`
/// into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`GenerationError`] if serialization or any file write fails.
pub async fn write_outputs(
    data: &MapData,
    styler: &MarkerStyler,
    dir: &Path,
) -> Result<ExportPaths, GenerationError> {
    tokio::fs::create_dir_all(dir).await?;

    let paths = ExportPaths {
        substations: dir.join("substations.geojson"),
        locations: dir.join("locations.geojson"),
        legend: dir.join("legend.json"),
    };

    let substations = substation_collection(&data.substations, styler)?;
    tokio::fs::write(&paths.substations, serde_json::to_string(&substations)?).await?;
    log::info!(
        "Exported {} substations to {}",
        substations.features.len(),
        paths.substations.display()
    );

    let locations = location_collection(&data.locations, styler)?;
    tokio::fs::write(&paths.locations, serde_json::to_string(&locations)?).await?;
    log::info!(
        "Exported {} locations to {}",
        locations.features.len(),
        paths.locations.display()
    );

    tokio::fs::write(&paths.legend, serde_json::to_string_pretty(&data.legend)?).await?;
    log::info!("Exported legend to {}", paths.legend.display());

    Ok(paths)
}
