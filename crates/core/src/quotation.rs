//! Quotation cost estimation: a stateless rate-table multiplication.
//!
//! Base rates are per square foot, keyed by project type and quality grade.
//! Each floor beyond the first adds 15% to the total.

/// Base rates per square foot: (project type, quality grade, rate).
const BASE_RATES: &[(&str, &str, f64)] = &[
    ("residential", "standard", 1500.0),
    ("residential", "premium", 2500.0),
    ("residential", "luxury", 4000.0),
    ("commercial", "standard", 2000.0),
    ("commercial", "premium", 3000.0),
    ("commercial", "luxury", 5000.0),
    ("industrial", "standard", 1200.0),
    ("industrial", "premium", 2000.0),
    ("industrial", "luxury", 3500.0),
    ("infrastructure", "standard", 1800.0),
    ("infrastructure", "premium", 2800.0),
    ("infrastructure", "luxury", 4500.0),
];

/// Fallback rate for unknown project-type/quality combinations.
const DEFAULT_RATE: f64 = 1500.0;

/// Surcharge applied per additional floor beyond the first.
const FLOOR_SURCHARGE: f64 = 0.15;

/// Look up the base rate per square foot for a project type and quality.
pub fn base_rate(project_type: &str, quality: &str) -> f64 {
    BASE_RATES
        .iter()
        .find(|(t, q, _)| *t == project_type && *q == quality)
        .map(|(_, _, rate)| *rate)
        .unwrap_or(DEFAULT_RATE)
}

/// Estimate total construction cost.
///
/// `area` is in square feet; `floors` counts total floors (minimum 1 for
/// the multiplier to be neutral).
pub fn estimate(project_type: &str, quality: &str, area: f64, floors: i32) -> f64 {
    let rate = base_rate(project_type, quality);
    let extra_floors = floors.saturating_sub(1).max(0);
    let floor_multiplier = 1.0 + extra_floors as f64 * FLOOR_SURCHARGE;
    area * rate * floor_multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_rates() {
        assert_eq!(base_rate("residential", "standard"), 1500.0);
        assert_eq!(base_rate("commercial", "luxury"), 5000.0);
        assert_eq!(base_rate("industrial", "premium"), 2000.0);
        assert_eq!(base_rate("infrastructure", "premium"), 2800.0);
    }

    #[test]
    fn test_unknown_combination_falls_back() {
        assert_eq!(base_rate("residential", "imaginary"), DEFAULT_RATE);
        assert_eq!(base_rate("spaceport", "luxury"), DEFAULT_RATE);
    }

    #[test]
    fn test_single_floor_has_no_surcharge() {
        assert_eq!(estimate("residential", "standard", 1000.0, 1), 1_500_000.0);
    }

    #[test]
    fn test_each_extra_floor_adds_15_percent() {
        // 2000 sq ft, premium residential, 2 floors: 2000 * 2500 * 1.15
        assert_eq!(estimate("residential", "premium", 2000.0, 2), 5_750_000.0);
        // 3 floors: multiplier 1.30
        assert_eq!(estimate("residential", "premium", 2000.0, 3), 6_500_000.0);
    }

    #[test]
    fn test_zero_floors_clamps_multiplier() {
        assert_eq!(estimate("commercial", "standard", 100.0, 0), 200_000.0);
    }

    #[test]
    fn test_extreme_negative_floors_clamps_multiplier() {
        assert_eq!(
            estimate("commercial", "standard", 100.0, i32::MIN),
            200_000.0
        );
    }
}
