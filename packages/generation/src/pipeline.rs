//! Load, aggregate, and scale: the full data pipeline.
//!
//! The two collections are fetched one after the other, locations first.
//! Substations are only requested once locations have loaded, and a
//! failure of either fetch stops the pipeline before any aggregation.
//! Aggregation completes before any legend value is computed.

use dist_gen_map_generation_models::config::{MapConfig, SourcesConfig};
use dist_gen_map_generation_models::{GenerationLocation, Legend, Substation};

use crate::aggregate::aggregate;
use crate::extent::compute_extent;
use crate::fetchers::fetch_collection;
use crate::ingest::{locations_from_features, substations_from_features};
use crate::scale::legend_series;
use crate::style::MarkerStyler;
use crate::{GenerationError, SourceKind};

/// Legend title for the substation series.
pub const SUBSTATIONS_TITLE: &str = "Substations";
/// Legend title for the location series.
pub const LOCATIONS_TITLE: &str = "Locations";

/// Raw records from both sources, before aggregation.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    /// Distributed generation locations.
    pub locations: Vec<GenerationLocation>,
    /// Substations with zero totals.
    pub substations: Vec<Substation>,
}

/// Aggregated map data ready for styling and export.
#[derive(Debug, Clone)]
pub struct MapData {
    /// Distributed generation locations.
    pub locations: Vec<GenerationLocation>,
    /// Substations annotated with their total generation.
    pub substations: Vec<Substation>,
    /// Legend breakpoints and map extent.
    pub legend: Legend,
}

/// Fetches both source collections sequentially.
///
/// # Errors
///
/// Returns [`GenerationError::DataUnavailable`] naming the first source
/// that failed. The substation source is never requested if the
/// location source fails.
pub async fn load(
    client: &reqwest::Client,
    sources: &SourcesConfig,
) -> Result<SourceData, GenerationError> {
    log::info!("Loading distributed generation locations from {}", sources.locations.location());
    let locations = fetch_collection(client, &sources.locations)
        .await
        .map_err(|e| unavailable(SourceKind::Locations, &e))?;
    let locations = locations_from_features(&locations.features);
    log::info!("Loaded {} generation locations", locations.len());

    log::info!("Loading substations from {}", sources.substations.location());
    let substations = fetch_collection(client, &sources.substations)
        .await
        .map_err(|e| unavailable(SourceKind::Substations, &e))?;
    let substations = substations_from_features(&substations.features);
    log::info!("Loaded {} substations", substations.len());

    Ok(SourceData {
        locations,
        substations,
    })
}

/// Logs a fetch failure once and wraps it as data-unavailable.
fn unavailable(source_kind: SourceKind, error: &GenerationError) -> GenerationError {
    log::error!("{source_kind} data failed to load: {error}");
    GenerationError::DataUnavailable {
        source_kind,
        message: error.to_string(),
    }
}

/// Aggregates substation totals and derives the legend.
#[must_use]
pub fn build(data: SourceData, styler: &MarkerStyler) -> MapData {
    let SourceData {
        locations,
        substations,
    } = data;

    let substations = aggregate(&locations, substations);
    let legend = build_legend(&locations, &substations, styler);

    MapData {
        locations,
        substations,
        legend,
    }
}

/// Derives both legend series and the map extent from aggregated data.
#[must_use]
pub fn build_legend(
    locations: &[GenerationLocation],
    substations: &[Substation],
    styler: &MarkerStyler,
) -> Legend {
    let substation_series = legend_series(
        SUBSTATIONS_TITLE,
        substations.iter().map(|s| s.total_generation_kw),
        styler.substation_scale(),
    );
    let location_series = legend_series(
        LOCATIONS_TITLE,
        locations.iter().map(|l| l.capacity_kw),
        styler.location_scale(),
    );

    if substation_series.scale.is_no_data() {
        log::warn!("No substations loaded, substation legend has no data");
    }
    if location_series.scale.is_no_data() {
        log::warn!("No generation locations loaded, location legend has no data");
    }

    let extent = compute_extent(
        locations
            .iter()
            .filter_map(|l| l.position)
            .chain(substations.iter().filter_map(|s| s.position)),
    );

    Legend {
        substations: substation_series,
        locations: location_series,
        extent,
    }
}

/// Loads both sources and builds the aggregated map data.
///
/// # Errors
///
/// Returns [`GenerationError`] if the HTTP client cannot be built or
/// either source fails to load.
pub async fn run(config: &MapConfig) -> Result<MapData, GenerationError> {
    let client = reqwest::Client::builder().build()?;
    let data = load(&client, &config.sources).await?;
    Ok(build(data, &MarkerStyler::new(config)))
}
