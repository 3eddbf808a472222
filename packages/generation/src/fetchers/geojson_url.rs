//! Direct `GeoJSON` URL fetcher.
//!
//! Fetches a standard `GeoJSON` `FeatureCollection` from any URL that
//! returns it directly.

use geojson::FeatureCollection;

use crate::GenerationError;
use crate::ingest::parse_feature_collection;

/// Fetches and parses a `GeoJSON` `FeatureCollection` from a URL.
///
/// # Errors
///
/// Returns [`GenerationError`] if the request fails, the server responds
/// with a non-success status, or the body cannot be parsed.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
) -> Result<FeatureCollection, GenerationError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(GenerationError::Conversion {
            message: format!("GeoJSON request failed with status {}", resp.status()),
        });
    }
    let body = resp.text().await?;

    parse_feature_collection(&body)
}
