//! Per-substation generation totals.
//!
//! Capacities are first summed into an index keyed by substation
//! identifier in a single pass over the locations, then each substation
//! reads its total from the index. Totals are always recomputed from the
//! locations, so aggregating already-annotated substations again yields
//! the same totals.

use std::collections::{BTreeMap, BTreeSet};

use dist_gen_map_generation_models::{FacilityId, GenerationLocation, Substation};

/// Summed capacity per substation identifier.
#[derive(Debug, Clone, Default)]
pub struct CapacityIndex {
    totals: BTreeMap<FacilityId, f64>,
    location_counts: BTreeMap<FacilityId, usize>,
}

impl CapacityIndex {
    /// Builds the index from a set of locations.
    ///
    /// Locations without a usable substation identifier contribute to
    /// nothing.
    #[must_use]
    pub fn build(locations: &[GenerationLocation]) -> Self {
        let mut index = Self::default();

        for location in locations {
            let Some(sub) = location.substation_id else {
                continue;
            };
            *index.totals.entry(sub).or_insert(0.0) += location.capacity_kw;
            *index.location_counts.entry(sub).or_insert(0) += 1;
        }

        index
    }

    /// Total capacity attached to `id`, zero when nothing references it.
    #[must_use]
    pub fn total(&self, id: Option<FacilityId>) -> f64 {
        let Some(id) = id else {
            return 0.0;
        };
        self.totals.get(&id).copied().unwrap_or(0.0)
    }

    /// Number of locations attached to `id`.
    #[must_use]
    pub fn location_count(&self, id: Option<FacilityId>) -> usize {
        let Some(id) = id else {
            return 0;
        };
        self.location_counts.get(&id).copied().unwrap_or(0)
    }

    /// Number of distinct substation identifiers referenced by locations.
    #[must_use]
    pub fn referenced_substations(&self) -> usize {
        self.totals.len()
    }
}

/// Annotates every substation with its total connected capacity.
///
/// Returns the substations in their original order. A substation with a
/// malformed identifier or no matching locations gets a total of zero.
#[must_use]
pub fn aggregate(
    locations: &[GenerationLocation],
    substations: Vec<Substation>,
) -> Vec<Substation> {
    let index = CapacityIndex::build(locations);

    let aggregated: Vec<Substation> = substations
        .into_iter()
        .map(|mut substation| {
            substation.total_generation_kw = index.total(substation.facility_id);
            substation
        })
        .collect();

    let with_generation = aggregated
        .iter()
        .filter(|s| s.total_generation_kw > 0.0)
        .count();
    log::info!(
        "Aggregated {} locations referencing {} substations into {} substations ({with_generation} with generation, {} without)",
        locations.len(),
        index.referenced_substations(),
        aggregated.len(),
        aggregated.len() - with_generation
    );

    let known: BTreeSet<FacilityId> = aggregated.iter().filter_map(|s| s.facility_id).collect();
    let matched: usize = known
        .into_iter()
        .map(|id| index.location_count(Some(id)))
        .sum();
    let attributable = locations.iter().filter(|l| l.substation_id.is_some()).count();
    if matched < attributable {
        log::warn!(
            "{} locations reference a substation that is not in the substation collection",
            attributable - matched
        );
    }

    aggregated
}

#[cfg(test)]
mod tests {
    use dist_gen_map_generation_models::GenerationType;

    use super::*;

    fn location(sub: f64, capacity_kw: f64, generation_type: GenerationType) -> GenerationLocation {
        GenerationLocation {
            feature_id: None,
            substation_id: FacilityId::new(sub),
            generation_type: Some(generation_type),
            capacity_kw,
            position: None,
            properties: serde_json::Map::new(),
        }
    }

    fn substation(id: f64, name: &str) -> Substation {
        Substation {
            feature_id: None,
            facility_id: FacilityId::new(id),
            name: name.to_string(),
            total_generation_kw: 0.0,
            position: None,
            properties: serde_json::Map::new(),
        }
    }

    fn scenario() -> (Vec<GenerationLocation>, Vec<Substation>) {
        (
            vec![
                location(1.0, 100.0, GenerationType::Solar),
                location(1.0, 50.0, GenerationType::Wind),
                location(2.0, 200.0, GenerationType::BioMass),
            ],
            vec![substation(1.0, "A"), substation(2.0, "B"), substation(3.0, "C")],
        )
    }

    fn totals(substations: &[Substation]) -> Vec<(String, f64)> {
        substations
            .iter()
            .map(|s| (s.name.clone(), s.total_generation_kw))
            .collect()
    }

    #[test]
    fn sums_capacity_per_substation() {
        let (locations, substations) = scenario();
        let result = aggregate(&locations, substations);
        assert_eq!(
            totals(&result),
            vec![
                ("A".to_string(), 150.0),
                ("B".to_string(), 200.0),
                ("C".to_string(), 0.0),
            ]
        );
    }

    #[test]
    fn total_is_independent_of_location_order() {
        let (mut locations, substations) = scenario();
        let forward = aggregate(&locations, substations.clone());
        locations.reverse();
        let reversed = aggregate(&locations, substations);
        assert_eq!(totals(&forward), totals(&reversed));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let (locations, substations) = scenario();
        let once = aggregate(&locations, substations);
        let twice = aggregate(&locations, once.clone());
        assert_eq!(totals(&once), totals(&twice));
    }

    #[test]
    fn empty_locations_give_zero_totals() {
        let (_, substations) = scenario();
        let result = aggregate(&[], substations);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|s| s.total_generation_kw.abs() < f64::EPSILON));
    }

    #[test]
    fn empty_substations_give_empty_result() {
        let (locations, _) = scenario();
        assert!(aggregate(&locations, Vec::new()).is_empty());
    }

    #[test]
    fn malformed_identifiers_never_match() {
        let mut orphan = location(1.0, 500.0, GenerationType::Solar);
        orphan.substation_id = None;
        let mut unnamed = substation(0.0, "Malformed");
        unnamed.facility_id = None;

        let result = aggregate(&[orphan], vec![unnamed]);
        assert!(result[0].total_generation_kw.abs() < f64::EPSILON);
    }

    #[test]
    fn index_counts_locations() {
        let (locations, _) = scenario();
        let index = CapacityIndex::build(&locations);
        assert_eq!(index.location_count(FacilityId::new(1.0)), 2);
        assert_eq!(index.location_count(FacilityId::new(3.0)), 0);
        assert_eq!(index.location_count(None), 0);
        assert_eq!(index.referenced_substations(), 2);
    }
}
