//! Marker radius scaling and legend breakpoints.
//!
//! Marker area is proportional to the value it represents, so radius
//! grows with the square root of the value. Every radius is floored at a
//! fixed minimum so zero-valued markers stay visible, which also keeps
//! the function monotonic.

use std::f64::consts::PI;

use dist_gen_map_generation_models::config::MarkerScaleConfig;
use dist_gen_map_generation_models::{LegendSeries, ScaleBreakpoints, SeriesScale};

use crate::coerce::coerce_number;
use crate::summary::format_grouped;

/// Legend peak values are rounded to a multiple of this.
const LEGEND_ROUNDING: f64 = 1000.0;

/// Area-preserving value-to-radius function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    /// Multiplier applied after the area conversion.
    pub scale_factor: f64,
    /// Smallest radius ever returned.
    pub minimum_radius: f64,
}

impl RadiusScale {
    /// Creates a radius scale.
    #[must_use]
    pub const fn new(scale_factor: f64, minimum_radius: f64) -> Self {
        Self {
            scale_factor,
            minimum_radius,
        }
    }

    /// Scale for generation location markers.
    #[must_use]
    pub const fn location(markers: &MarkerScaleConfig) -> Self {
        Self::new(markers.location_scale, markers.minimum_radius)
    }

    /// Scale for substation markers.
    #[must_use]
    pub const fn substation(markers: &MarkerScaleConfig) -> Self {
        Self::new(markers.substation_scale, markers.minimum_radius)
    }

    /// Returns the display radius for `value`.
    ///
    /// Zero, negative, and `NaN` inputs return the minimum radius. Small
    /// positive values whose scaled radius falls below the minimum are
    /// clamped up to it as well, so every drawn marker stays visible.
    #[must_use]
    pub fn radius(&self, value: f64) -> f64 {
        if value.is_nan() || value <= 0.0 {
            return self.minimum_radius;
        }
        ((value / PI).sqrt() * self.scale_factor).max(self.minimum_radius)
    }

    /// Returns the display diameter for `value`.
    #[must_use]
    pub fn diameter(&self, value: f64) -> f64 {
        self.radius(value) * 2.0
    }

    /// Returns the display radius for an untyped attribute value.
    ///
    /// Unparseable values are treated as zero.
    #[must_use]
    pub fn radius_of(&self, value: &serde_json::Value) -> f64 {
        self.radius(coerce_number(value).unwrap_or(0.0))
    }
}

/// Rounds to the nearest thousand, halves rounding away from zero.
#[must_use]
pub fn round_to_thousand(value: f64) -> f64 {
    (value / LEGEND_ROUNDING).round() * LEGEND_ROUNDING
}

/// Computes the legend reference circles for a series of values.
///
/// The large circle shows the series peak rounded to the nearest
/// thousand; the small circle shows half of that. Non-finite values are
/// ignored, and a series with no finite values yields
/// [`SeriesScale::NoData`].
#[must_use]
pub fn breakpoints(values: impl IntoIterator<Item = f64>, scale: &RadiusScale) -> SeriesScale {
    let Some(peak) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .reduce(f64::max)
    else {
        return SeriesScale::NoData;
    };

    let max_value = round_to_thousand(peak);
    let minor_value = max_value / 2.0;

    SeriesScale::Scaled(ScaleBreakpoints {
        max_value,
        max_diameter: scale.diameter(max_value),
        minor_value,
        minor_diameter: scale.diameter(minor_value),
    })
}

/// Builds a titled legend series with formatted circle labels.
#[must_use]
pub fn legend_series(
    title: &str,
    values: impl IntoIterator<Item = f64>,
    scale: &RadiusScale,
) -> LegendSeries {
    let series_scale = breakpoints(values, scale);
    let (large_label, small_label) = series_scale.breakpoints().map_or((None, None), |b| {
        (
            Some(format_grouped(b.max_value)),
            Some(format_grouped(b.minor_value)),
        )
    });

    LegendSeries {
        title: title.to_string(),
        scale: series_scale,
        large_label,
        small_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: RadiusScale = RadiusScale::new(0.8, 3.0);

    #[test]
    fn zero_returns_minimum_radius() {
        assert!((SCALE.radius(0.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_and_nan_return_minimum_radius() {
        assert!((SCALE.radius(-50.0) - 3.0).abs() < f64::EPSILON);
        assert!((SCALE.radius(f64::NAN) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn small_positive_values_clamp_to_minimum() {
        // sqrt(10 / pi) * 0.8 is about 1.43
        assert!((SCALE.radius(10.0) - 3.0).abs() < f64::EPSILON);
        assert!(SCALE.radius(200.0) > 3.0);
    }

    #[test]
    fn radius_preserves_area() {
        let radius = RadiusScale::new(1.0, 0.0).radius(PI * 100.0);
        assert!((radius - 10.0).abs() < 1e-9);

        let scaled = RadiusScale::new(1.5, 0.0).radius(PI * 100.0);
        assert!((scaled - 15.0).abs() < 1e-9);
    }

    #[test]
    fn radius_is_monotonic() {
        let mut previous = SCALE.radius(0.0);
        for step in 0..2000 {
            let value = f64::from(step) * 2.5;
            let radius = SCALE.radius(value);
            assert!(radius >= previous, "radius({value}) = {radius} < {previous}");
            previous = radius;
        }
    }

    #[test]
    fn unparseable_attribute_is_zero() {
        let radius = SCALE.radius_of(&serde_json::json!("unknown"));
        assert!((radius - 3.0).abs() < f64::EPSILON);
        let parsed = SCALE.radius_of(&serde_json::json!("4000"));
        assert!((parsed - SCALE.radius(4000.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn rounds_to_nearest_thousand() {
        assert!((round_to_thousand(2600.0) - 3000.0).abs() < f64::EPSILON);
        assert!((round_to_thousand(2400.0) - 2000.0).abs() < f64::EPSILON);
        assert!((round_to_thousand(2500.0) - 3000.0).abs() < f64::EPSILON);
        assert!(round_to_thousand(200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn breakpoints_cross_thousand_boundary() {
        let SeriesScale::Scaled(b) = breakpoints([1500.0, 2600.0], &SCALE) else {
            panic!("expected breakpoints");
        };
        assert!((b.max_value - 3000.0).abs() < f64::EPSILON);
        assert!((b.minor_value - 1500.0).abs() < f64::EPSILON);
        assert!((b.max_diameter - SCALE.radius(3000.0) * 2.0).abs() < f64::EPSILON);
        assert!((b.minor_diameter - SCALE.radius(1500.0) * 2.0).abs() < f64::EPSILON);
        assert!(b.minor_diameter < b.max_diameter);
    }

    #[test]
    fn small_series_rounds_to_zero() {
        let SeriesScale::Scaled(b) = breakpoints([150.0, 200.0, 0.0], &SCALE) else {
            panic!("expected breakpoints");
        };
        assert!(b.max_value.abs() < f64::EPSILON);
        assert!((b.max_diameter - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_series_has_no_data() {
        assert!(breakpoints(Vec::<f64>::new(), &SCALE).is_no_data());
        assert!(breakpoints([f64::NAN], &SCALE).is_no_data());
    }

    #[test]
    fn legend_series_labels_circles() {
        let series = legend_series("Substations", [12_400.0, 800.0], &SCALE);
        assert_eq!(series.title, "Substations");
        assert_eq!(series.large_label.as_deref(), Some("12,000"));
        assert_eq!(series.small_label.as_deref(), Some("6,000"));

        let empty = legend_series("Locations", std::iter::empty(), &SCALE);
        assert!(empty.scale.is_no_data());
        assert!(empty.large_label.is_none());
    }
}
