#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Distributed generation and substation types.
//!
//! These types describe the two point-feature collections the map is
//! built from (generation locations and the substations they feed), the
//! per-feature marker styling handed to a renderer, and the legend scale
//! breakpoints derived from the aggregated capacities.

pub mod config;

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Generation technology as published in the `DISTGENTYP` attribute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum GenerationType {
    /// Photovoltaic generation.
    Solar,
    /// Wind turbines.
    Wind,
    /// Biomass combustion or digestion.
    BioMass,
    /// Combined solar and wind installation.
    #[serde(rename = "Dual-S_W")]
    #[strum(serialize = "Dual-S_W")]
    DualSolarWind,
}

impl GenerationType {
    /// Returns the map layer this generation type is drawn on.
    ///
    /// Dual solar/wind installations share the solar layer.
    #[must_use]
    pub const fn layer(self) -> GenerationLayer {
        match self {
            Self::Solar | Self::DualSolarWind => GenerationLayer::Solar,
            Self::Wind => GenerationLayer::Wind,
            Self::BioMass => GenerationLayer::Biomass,
        }
    }
}

/// Toggleable map layer grouping generation locations by technology.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationLayer {
    /// Biomass locations.
    Biomass,
    /// Solar and dual solar/wind locations.
    Solar,
    /// Wind locations.
    Wind,
}

impl GenerationLayer {
    /// All layers in drawing order.
    pub const ALL: &[Self] = &[Self::Biomass, Self::Solar, Self::Wind];

    /// Human-readable label used in layer controls.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Biomass => "Bio Mass",
            Self::Solar => "Solar",
            Self::Wind => "Wind",
        }
    }
}

/// Numeric substation identifier.
///
/// Identifiers arrive as either JSON numbers or numeric strings and are
/// always compared by numeric value. Only finite values can be
/// constructed, and `-0.0` is normalized to `0.0`, so equality, ordering,
/// and hashing agree with each other.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct FacilityId(f64);

impl FacilityId {
    /// Creates an identifier from a numeric value.
    ///
    /// Returns `None` for `NaN` and infinities.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        #[allow(clippy::float_cmp)]
        let value = if value == 0.0 { 0.0 } else { value };
        Some(Self(value))
    }

    /// Returns the numeric value of this identifier.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for FacilityId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FacilityId {}

impl PartialOrd for FacilityId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FacilityId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for FacilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl std::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `GeoJSON` feature `id` member, kept exactly as the source wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    /// A string identifier.
    String(String),
    /// A numeric identifier.
    Number(serde_json::Number),
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A longitude/latitude pair taken from a `Point` geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

/// A distributed generation location, as loaded from the locations
/// feature collection.
///
/// Values are coerced at ingestion: `capacity_kw` is never negative or
/// non-finite, and a malformed `SUB` value leaves `substation_id` empty
/// so the location never matches any substation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationLocation {
    /// The feature's `id` member, if the source provides one.
    pub feature_id: Option<FeatureId>,
    /// Identifier of the substation this location is connected to (`SUB`).
    pub substation_id: Option<FacilityId>,
    /// Generation technology (`DISTGENTYP`). `None` for unrecognized values.
    pub generation_type: Option<GenerationType>,
    /// Installed capacity in kilowatts (`DISTGENSIZ`).
    pub capacity_kw: f64,
    /// Point position of the feature.
    pub position: Option<Position>,
    /// The feature's original property bag, passed through on export.
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// A substation, as loaded from the substations feature collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Substation {
    /// The feature's `id` member, if the source provides one.
    pub feature_id: Option<FeatureId>,
    /// Unique facility identifier (`FACILITYID`). `None` when malformed.
    pub facility_id: Option<FacilityId>,
    /// Display name (`NAME`).
    pub name: String,
    /// Sum of connected generation capacity in kilowatts. Zero until the
    /// aggregator has run.
    pub total_generation_kw: f64,
    /// Point position of the feature.
    pub position: Option<Position>,
    /// The feature's original property bag, passed through on export.
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Legend reference circles for a single series of values.
///
/// `minor_value` is half of `max_value`, not a statistical median.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleBreakpoints {
    /// Peak value rounded to the nearest thousand.
    pub max_value: f64,
    /// Display diameter of a marker at `max_value`.
    pub max_diameter: f64,
    /// Half of `max_value`.
    pub minor_value: f64,
    /// Display diameter of a marker at `minor_value`.
    pub minor_diameter: f64,
}

/// Scale result for a series, distinguishing an empty series from a
/// computed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeriesScale {
    /// The series had no values.
    NoData,
    /// Breakpoints computed from a non-empty series.
    Scaled(ScaleBreakpoints),
}

impl SeriesScale {
    /// Returns the breakpoints, or `None` when the series was empty.
    #[must_use]
    pub const fn breakpoints(&self) -> Option<&ScaleBreakpoints> {
        match self {
            Self::NoData => None,
            Self::Scaled(breakpoints) => Some(breakpoints),
        }
    }

    /// Whether the series had no values.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Circle marker style consumed by the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Radius in pixels.
    pub radius: f64,
    /// Fill color as a CSS hex string.
    pub fill_color: String,
    /// Stroke color as a CSS hex string.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Stroke opacity.
    pub opacity: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
}

/// One side of the legend: a titled pair of reference circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSeries {
    /// Series title (e.g. "Substations").
    pub title: String,
    /// Reference circle sizes.
    pub scale: SeriesScale,
    /// Label for the large circle (e.g. "3,000").
    pub large_label: Option<String>,
    /// Label for the small circle (e.g. "1,500").
    pub small_label: Option<String>,
}

/// Geographic bounding box of the loaded features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extent {
    /// Western edge.
    pub min_lon: f64,
    /// Southern edge.
    pub min_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
}

/// Everything the renderer needs to draw the legend and fit the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Substation total generation circles.
    pub substations: LegendSeries,
    /// Generation location capacity circles.
    pub locations: LegendSeries,
    /// Bounding box of all features, if any had a position.
    pub extent: Option<Extent>,
}

/// Detail panel contents for a single substation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstationSummary {
    /// Substation display name.
    pub name: String,
    /// Total connected generation in kilowatts.
    pub total_generation_kw: f64,
    /// Total formatted for display (e.g. "12,345 kW").
    pub total_label: String,
    /// Number of generation locations connected to this substation.
    pub location_count: usize,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn generation_type_parses_source_values() {
        assert_eq!(
            GenerationType::from_str("Solar").unwrap(),
            GenerationType::Solar
        );
        assert_eq!(
            GenerationType::from_str("BioMass").unwrap(),
            GenerationType::BioMass
        );
        assert_eq!(
            GenerationType::from_str("Dual-S_W").unwrap(),
            GenerationType::DualSolarWind
        );
        assert!(GenerationType::from_str("Hydro").is_err());
    }

    #[test]
    fn dual_type_shares_solar_layer() {
        assert_eq!(GenerationType::DualSolarWind.layer(), GenerationLayer::Solar);
        assert_eq!(GenerationType::Solar.layer(), GenerationLayer::Solar);
        assert_eq!(GenerationType::Wind.layer(), GenerationLayer::Wind);
        assert_eq!(GenerationType::BioMass.layer(), GenerationLayer::Biomass);
    }

    #[test]
    fn facility_id_rejects_non_finite() {
        assert!(FacilityId::new(f64::NAN).is_none());
        assert!(FacilityId::new(f64::INFINITY).is_none());
        assert!(FacilityId::new(12.0).is_some());
    }

    #[test]
    fn facility_id_negative_zero_equals_zero() {
        let mut set = BTreeSet::new();
        set.insert(FacilityId::new(0.0).unwrap());
        assert!(set.contains(&FacilityId::new(-0.0).unwrap()));
    }

    #[test]
    fn feature_id_keeps_json_type() {
        let number: FeatureId = serde_json::from_str("5").unwrap();
        assert_eq!(number, FeatureId::Number(5_u64.into()));
        assert_eq!(serde_json::to_string(&number).unwrap(), "5");

        let string: FeatureId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(string, FeatureId::String("5".to_string()));
        assert_eq!(string.to_string(), number.to_string());
    }

    #[test]
    fn series_scale_serializes_with_status_tag() {
        let json = serde_json::to_value(SeriesScale::NoData).unwrap();
        assert_eq!(json["status"], "no_data");

        let scaled = SeriesScale::Scaled(ScaleBreakpoints {
            max_value: 3000.0,
            max_diameter: 10.0,
            minor_value: 1500.0,
            minor_diameter: 7.0,
        });
        let json = serde_json::to_value(scaled).unwrap();
        assert_eq!(json["status"], "scaled");
        assert_eq!(json["maxValue"], 3000.0);
    }
}
