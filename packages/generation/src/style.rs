//! Per-feature marker styling.
//!
//! Colors come from the configured palette, radii from the configured
//! marker scales. Nothing here holds global state; a [`MarkerStyler`] is
//! built from a [`MapConfig`] and handed to whatever draws the markers.

use std::collections::BTreeMap;

use dist_gen_map_generation_models::config::{MapConfig, PaletteConfig};
use dist_gen_map_generation_models::{GenerationLayer, GenerationLocation, MarkerStyle, Substation};

use crate::scale::RadiusScale;

const FILL_OPACITY: f64 = 0.8;
const LOCATION_WEIGHT: f64 = 0.5;
const LOCATION_OPACITY: f64 = 0.0;
const SUBSTATION_WEIGHT: f64 = 1.0;
const SUBSTATION_OPACITY: f64 = 1.0;
const EMPTY_SUBSTATION_WEIGHT: f64 = 0.5;

/// Computes marker styles from a palette and marker scales.
#[derive(Debug, Clone)]
pub struct MarkerStyler {
    palette: PaletteConfig,
    location_scale: RadiusScale,
    substation_scale: RadiusScale,
}

impl MarkerStyler {
    /// Creates a styler from the map configuration.
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        Self {
            palette: config.palette.clone(),
            location_scale: RadiusScale::location(&config.markers),
            substation_scale: RadiusScale::substation(&config.markers),
        }
    }

    /// Radius scale used for generation locations.
    #[must_use]
    pub const fn location_scale(&self) -> &RadiusScale {
        &self.location_scale
    }

    /// Radius scale used for substations.
    #[must_use]
    pub const fn substation_scale(&self) -> &RadiusScale {
        &self.substation_scale
    }

    /// Color for a generation layer.
    #[must_use]
    pub fn layer_color(&self, layer: GenerationLayer) -> &str {
        match layer {
            GenerationLayer::Biomass => self.palette.biomass.as_str(),
            GenerationLayer::Solar => self.palette.solar.as_str(),
            GenerationLayer::Wind => self.palette.wind.as_str(),
        }
    }

    /// Style for a generation location, sized by its capacity.
    ///
    /// Returns `None` for locations with an unrecognized generation type,
    /// which belong to no layer and are not drawn.
    #[must_use]
    pub fn location_style(&self, location: &GenerationLocation) -> Option<MarkerStyle> {
        let layer = location.generation_type?.layer();
        let color = self.layer_color(layer).to_string();

        Some(MarkerStyle {
            radius: self.location_scale.radius(location.capacity_kw),
            fill_color: color.clone(),
            color,
            weight: LOCATION_WEIGHT,
            opacity: LOCATION_OPACITY,
            fill_opacity: FILL_OPACITY,
        })
    }

    /// Style for a substation, sized by its aggregated total.
    ///
    /// Substations without connected generation are drawn as small
    /// neutral markers at the minimum radius.
    #[must_use]
    pub fn substation_style(&self, substation: &Substation) -> MarkerStyle {
        if substation.total_generation_kw > 0.0 {
            MarkerStyle {
                radius: self.substation_scale.radius(substation.total_generation_kw),
                fill_color: self.palette.substation.clone(),
                color: self.palette.substation.clone(),
                weight: SUBSTATION_WEIGHT,
                opacity: SUBSTATION_OPACITY,
                fill_opacity: FILL_OPACITY,
            }
        } else {
            MarkerStyle {
                radius: self.substation_scale.minimum_radius,
                fill_color: self.palette.substation_empty.clone(),
                color: self.palette.substation_empty.clone(),
                weight: EMPTY_SUBSTATION_WEIGHT,
                opacity: SUBSTATION_OPACITY,
                fill_opacity: FILL_OPACITY,
            }
        }
    }
}

/// Groups locations by the layer they are drawn on.
///
/// Locations with an unrecognized generation type are left out.
#[must_use]
pub fn group_by_layer(
    locations: &[GenerationLocation],
) -> BTreeMap<GenerationLayer, Vec<&GenerationLocation>> {
    let mut layers: BTreeMap<GenerationLayer, Vec<&GenerationLocation>> = BTreeMap::new();

    for location in locations {
        match location.generation_type {
            Some(generation_type) => layers
                .entry(generation_type.layer())
                .or_default()
                .push(location),
            None => log::debug!(
                "Location {:?} has no recognized generation type, leaving it off the map",
                location.feature_id
            ),
        }
    }

    layers
}

#[cfg(test)]
mod tests {
    use dist_gen_map_generation_models::{FacilityId, GenerationType};

    use super::*;

    fn location(generation_type: Option<GenerationType>, capacity_kw: f64) -> GenerationLocation {
        GenerationLocation {
            feature_id: None,
            substation_id: FacilityId::new(1.0),
            generation_type,
            capacity_kw,
            position: None,
            properties: serde_json::Map::new(),
        }
    }

    fn substation(total_generation_kw: f64) -> Substation {
        Substation {
            feature_id: None,
            facility_id: FacilityId::new(1.0),
            name: "Test".to_string(),
            total_generation_kw,
            position: None,
            properties: serde_json::Map::new(),
        }
    }

    #[test]
    fn locations_are_colored_by_layer() {
        let styler = MarkerStyler::new(&MapConfig::default());

        let dual = styler
            .location_style(&location(Some(GenerationType::DualSolarWind), 400.0))
            .unwrap();
        assert_eq!(dual.fill_color, "#ff7800");

        let wind = styler
            .location_style(&location(Some(GenerationType::Wind), 400.0))
            .unwrap();
        assert_eq!(wind.color, "#b383c4");
        assert!((wind.radius - styler.location_scale().radius(400.0)).abs() < f64::EPSILON);

        assert!(styler.location_style(&location(None, 400.0)).is_none());
    }

    #[test]
    fn empty_substations_use_secondary_style() {
        let styler = MarkerStyler::new(&MapConfig::default());

        let empty = styler.substation_style(&substation(0.0));
        assert_eq!(empty.fill_color, "#DFDFDF");
        assert!((empty.radius - 3.0).abs() < f64::EPSILON);

        let active = styler.substation_style(&substation(5000.0));
        assert_eq!(active.fill_color, "#5067af");
        assert!(active.radius > empty.radius);
    }

    #[test]
    fn groups_dual_with_solar() {
        let locations = vec![
            location(Some(GenerationType::Solar), 1.0),
            location(Some(GenerationType::DualSolarWind), 1.0),
            location(Some(GenerationType::BioMass), 1.0),
            location(None, 1.0),
        ];
        let layers = group_by_layer(&locations);
        assert_eq!(layers[&GenerationLayer::Solar].len(), 2);
        assert_eq!(layers[&GenerationLayer::Biomass].len(), 1);
        assert!(!layers.contains_key(&GenerationLayer::Wind));
    }
}
