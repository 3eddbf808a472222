//! Substation detail panel data and number formatting.

use dist_gen_map_generation_models::{
    FacilityId, GenerationLocation, Substation, SubstationSummary,
};

/// Unit suffix for capacity labels.
const CAPACITY_UNIT: &str = "kW";

/// Formats a number with comma thousands separators and at most three
/// fraction digits, trailing zeros removed (e.g. `12345.5` -> `"12,345.5"`).
#[must_use]
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let text = format!("{:.3}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    out
}

/// Formats a capacity in kilowatts (e.g. `"12,345 kW"`).
#[must_use]
pub fn format_kw(value: f64) -> String {
    format!("{} {CAPACITY_UNIT}", format_grouped(value))
}

/// Returns the locations connected to the substation with `id`.
///
/// Matching is numeric, so the result is the same whether identifiers
/// were loaded as strings or numbers.
#[must_use]
pub fn locations_for(
    locations: &[GenerationLocation],
    id: FacilityId,
) -> Vec<&GenerationLocation> {
    locations
        .iter()
        .filter(|location| location.substation_id == Some(id))
        .collect()
}

/// Finds a substation by identifier.
#[must_use]
pub fn find_substation(substations: &[Substation], id: FacilityId) -> Option<&Substation> {
    substations.iter().find(|s| s.facility_id == Some(id))
}

/// Builds the detail panel contents for an aggregated substation.
#[must_use]
pub fn summarize(substation: &Substation, locations: &[GenerationLocation]) -> SubstationSummary {
    let location_count = substation
        .facility_id
        .map_or(0, |id| locations_for(locations, id).len());

    SubstationSummary {
        name: substation.name.clone(),
        total_generation_kw: substation.total_generation_kw,
        total_label: format_kw(substation.total_generation_kw),
        location_count,
    }
}
