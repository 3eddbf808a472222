//! Converts raw `GeoJSON` feature collections into typed records.
//!
//! This is the only place untyped property bags are interpreted. Field
//! values are coerced here (see [`crate::coerce`]) so everything
//! downstream works with plain numbers and optional identifiers.

use std::str::FromStr as _;

use dist_gen_map_generation_models::{
    FeatureId, GenerationLocation, GenerationType, Position, Substation,
};
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::GenerationError;
use crate::coerce::{coerce_capacity, coerce_facility_id, coerce_number};

/// Location attribute holding the substation foreign key.
pub const SUBSTATION_KEY_FIELD: &str = "SUB";
/// Location attribute holding the capacity in kilowatts.
pub const CAPACITY_FIELD: &str = "DISTGENSIZ";
/// Location attribute holding the generation type.
pub const GENERATION_TYPE_FIELD: &str = "DISTGENTYP";
/// Substation attribute holding the facility identifier.
pub const FACILITY_ID_FIELD: &str = "FACILITYID";
/// Substation attribute holding the display name.
pub const NAME_FIELD: &str = "NAME";
/// Attribute used to label a feature in log messages when it has no
/// `id` member.
const OBJECT_ID_FIELD: &str = "OBJECTID";

/// Parses a `GeoJSON` document that must be a `FeatureCollection`.
///
/// # Errors
///
/// Returns [`GenerationError::GeoJson`] if the text is not valid
/// `GeoJSON`, or [`GenerationError::Conversion`] if it is some other
/// kind of `GeoJSON` object.
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, GenerationError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(GenerationError::Conversion {
            message: "Expected a FeatureCollection, found a single Feature".to_string(),
        }),
        GeoJson::Geometry(_) => Err(GenerationError::Conversion {
            message: "Expected a FeatureCollection, found a bare Geometry".to_string(),
        }),
    }
}

/// Converts location features into [`GenerationLocation`] records.
#[must_use]
pub fn locations_from_features(features: &[Feature]) -> Vec<GenerationLocation> {
    features.iter().map(location_from_feature).collect()
}

/// Converts substation features into [`Substation`] records with a zero
/// total.
#[must_use]
pub fn substations_from_features(features: &[Feature]) -> Vec<Substation> {
    features.iter().map(substation_from_feature).collect()
}

fn location_from_feature(feature: &Feature) -> GenerationLocation {
    let properties = feature.properties.clone().unwrap_or_default();
    let feature_id = source_feature_id(feature);
    let label = log_label(feature_id.as_ref(), &properties);

    let raw_sub = properties.get(SUBSTATION_KEY_FIELD);
    let substation_id = coerce_facility_id(raw_sub);
    if substation_id.is_none() {
        log::warn!(
            "Location {label}: {SUBSTATION_KEY_FIELD} {raw_sub:?} is not numeric, location will not match any substation"
        );
    }

    let raw_capacity = properties.get(CAPACITY_FIELD);
    if raw_capacity.and_then(coerce_number).is_none_or(|kw| kw < 0.0) {
        log::warn!(
            "Location {label}: {CAPACITY_FIELD} {raw_capacity:?} is not a usable capacity, using 0"
        );
    }
    let capacity_kw = coerce_capacity(raw_capacity);

    let generation_type = properties
        .get(GENERATION_TYPE_FIELD)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .and_then(|raw| {
            let parsed = GenerationType::from_str(raw).ok();
            if parsed.is_none() {
                log::warn!("Location {label}: unknown {GENERATION_TYPE_FIELD} '{raw}'");
            }
            parsed
        });

    GenerationLocation {
        feature_id,
        substation_id,
        generation_type,
        capacity_kw,
        position: point_position(feature),
        properties,
    }
}

fn substation_from_feature(feature: &Feature) -> Substation {
    let properties = feature.properties.clone().unwrap_or_default();

    let name = match properties.get(NAME_FIELD) {
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let raw_id = properties.get(FACILITY_ID_FIELD);
    let facility_id = coerce_facility_id(raw_id);
    if facility_id.is_none() {
        log::warn!(
            "Substation '{name}': {FACILITY_ID_FIELD} {raw_id:?} is not numeric, no generation will be attributed to it"
        );
    }

    Substation {
        feature_id: source_feature_id(feature),
        facility_id,
        name,
        total_generation_kw: 0.0,
        position: point_position(feature),
        properties,
    }
}

fn source_feature_id(feature: &Feature) -> Option<FeatureId> {
    match feature.id.as_ref()? {
        geojson::feature::Id::String(s) => Some(FeatureId::String(s.clone())),
        geojson::feature::Id::Number(n) => Some(FeatureId::Number(n.clone())),
    }
}

/// Names a feature for log messages: its `id` member, else `OBJECTID`.
fn log_label(feature_id: Option<&FeatureId>, properties: &geojson::JsonObject) -> String {
    feature_id.map_or_else(
        || match properties.get(OBJECT_ID_FIELD) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => "<no id>".to_string(),
        },
        ToString::to_string,
    )
}

/// Extracts the position of a `Point` geometry. Other geometry types
/// yield `None`.
fn point_position(feature: &Feature) -> Option<Position> {
    let geometry: geo::Geometry<f64> = feature.geometry.clone()?.try_into().ok()?;
    match geometry {
        geo::Geometry::Point(point) => Some(Position {
            lon: point.x(),
            lat: point.y(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use dist_gen_map_generation_models::FacilityId;

    use super::*;

    const LOCATIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 7,
                "geometry": { "type": "Point", "coordinates": [-105.1, 39.5] },
                "properties": { "SUB": "12", "DISTGENSIZ": "250.5", "DISTGENTYP": "Dual-S_W" }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": { "OBJECTID": 8, "SUB": "n/a", "DISTGENSIZ": "lots", "DISTGENTYP": "Hydro" }
            }
        ]
    }"#;

    const SUBSTATIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-104.9, 39.7] },
                "properties": { "FACILITYID": 12, "NAME": " Arapahoe " }
            }
        ]
    }"#;

    #[test]
    fn parses_locations_with_coercion() {
        let collection = parse_feature_collection(LOCATIONS).unwrap();
        let locations = locations_from_features(&collection.features);
        assert_eq!(locations.len(), 2);

        let first = &locations[0];
        assert_eq!(first.feature_id, Some(FeatureId::Number(7_u64.into())));
        assert_eq!(first.substation_id, FacilityId::new(12.0));
        assert_eq!(first.generation_type, Some(GenerationType::DualSolarWind));
        assert!((first.capacity_kw - 250.5).abs() < f64::EPSILON);
        let position = first.position.unwrap();
        assert!((position.lon - -105.1).abs() < f64::EPSILON);
        assert!((position.lat - 39.5).abs() < f64::EPSILON);

        let second = &locations[1];
        assert!(second.feature_id.is_none());
        assert!(second.substation_id.is_none());
        assert!(second.generation_type.is_none());
        assert!(second.capacity_kw.abs() < f64::EPSILON);
        assert!(second.position.is_none());
    }

    #[test]
    fn parses_substations_with_zero_total() {
        let collection = parse_feature_collection(SUBSTATIONS).unwrap();
        let substations = substations_from_features(&collection.features);
        assert_eq!(substations.len(), 1);
        assert_eq!(substations[0].name, "Arapahoe");
        assert_eq!(substations[0].facility_id, FacilityId::new(12.0));
        assert!(substations[0].total_generation_kw.abs() < f64::EPSILON);
        assert!(substations[0].properties.contains_key("FACILITYID"));
    }

    #[test]
    fn rejects_non_collection_documents() {
        let point = r#"{ "type": "Point", "coordinates": [0.0, 0.0] }"#;
        assert!(matches!(
            parse_feature_collection(point),
            Err(GenerationError::Conversion { .. })
        ));
        assert!(matches!(
            parse_feature_collection("not json"),
            Err(GenerationError::GeoJson(_))
        ));
    }
}
