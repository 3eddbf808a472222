//! Numeric coercion for untyped `GeoJSON` property values.
//!
//! Source attributes arrive as JSON numbers, numeric strings, or junk.
//! Capacities coerce to a non-negative kilowatt value (zero when
//! unusable); identifiers coerce to a [`FacilityId`] or to nothing, so a
//! malformed identifier never matches anything.

use dist_gen_map_generation_models::FacilityId;
use serde_json::Value;

/// Parses a JSON value as a finite number.
///
/// Accepts JSON numbers and strings containing a number (surrounding
/// whitespace is ignored). Returns `None` for blank strings, non-numeric
/// strings, booleans, `null`, arrays, objects, and non-finite results.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };

    number.is_finite().then_some(number)
}

/// Coerces a capacity attribute to kilowatts.
///
/// Missing, unparseable, and negative values all become `0.0`.
#[must_use]
pub fn coerce_capacity(value: Option<&Value>) -> f64 {
    value.and_then(coerce_number).map_or(0.0, |kw| kw.max(0.0))
}

/// Coerces an identifier attribute to a [`FacilityId`].
///
/// Returns `None` when the value is missing or not numeric.
#[must_use]
pub fn coerce_facility_id(value: Option<&Value>) -> Option<FacilityId> {
    value.and_then(coerce_number).and_then(FacilityId::new)
}
