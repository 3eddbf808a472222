//! Bounding box of the loaded features.

use dist_gen_map_generation_models::{Extent, Position};
use geo::{BoundingRect, MultiPoint, Point};

/// Computes the bounding box of a set of positions.
///
/// Returns `None` when there are no positions.
#[must_use]
pub fn compute_extent(positions: impl IntoIterator<Item = Position>) -> Option<Extent> {
    let points: MultiPoint<f64> = positions
        .into_iter()
        .map(|p| Point::new(p.lon, p.lat))
        .collect();

    points.bounding_rect().map(|rect| Extent {
        min_lon: rect.min().x,
        min_lat: rect.min().y,
        max_lon: rect.max().x,
        max_lat: rect.max().y,
    })
}
