//! Fetcher dispatch for the configured source types.
//!
//! Each fetcher returns the parsed `GeoJSON` `FeatureCollection`.

pub mod file;
pub mod geojson_url;

use dist_gen_map_generation_models::config::SourceConfig;
use geojson::FeatureCollection;

use crate::GenerationError;

/// Fetches a feature collection from the configured source.
///
/// # Errors
///
/// Returns [`GenerationError`] if the source cannot be read or does not
/// contain a `GeoJSON` `FeatureCollection`.
pub async fn fetch_collection(
    client: &reqwest::Client,
    source: &SourceConfig,
) -> Result<FeatureCollection, GenerationError> {
    match source {
        SourceConfig::File { path } => file::fetch(path).await,
        SourceConfig::GeojsonUrl { url } => geojson_url::fetch(client, url).await,
    }
}
