//! Local `GeoJSON` file fetcher.

use geojson::FeatureCollection;

use crate::GenerationError;
use crate::ingest::parse_feature_collection;

/// Reads and parses a `GeoJSON` `FeatureCollection` from disk.
///
/// # Errors
///
/// Returns [`GenerationError`] if the file cannot be read or parsed.
pub async fn fetch(path: &str) -> Result<FeatureCollection, GenerationError> {
    let body = tokio::fs::read_to_string(path).await?;
    parse_feature_collection(&body)
}
