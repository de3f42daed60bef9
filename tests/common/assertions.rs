//! Assertion utilities for testing.
//!
//! Floating-point comparisons for temperature averages.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a TMIN/TAVG/TMAX payload is ordered and fully populated
///
/// # Panics
///
/// Panics if any field is null or the three are out of order.
pub fn assert_ordered_summary(summary: &serde_json::Value) {
    let field = |name: &str| {
        summary[name]
            .as_f64()
            .unwrap_or_else(|| panic!("{} is not a number in {}", name, summary))
    };
    let (tmin, tavg, tmax) = (field("TMIN"), field("TAVG"), field("TMAX"));

    assert!(
        tmin <= tavg && tavg <= tmax,
        "Summary out of order: TMIN = {}, TAVG = {}, TMAX = {}",
        tmin,
        tavg,
        tmax
    );
}

/// Assert that a TMIN/TAVG/TMAX payload is entirely null
pub fn assert_null_summary(summary: &serde_json::Value) {
    assert_eq!(
        summary,
        &serde_json::json!({"TMIN": null, "TAVG": null, "TMAX": null})
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(70.5, 70.5000000001, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_ordered_summary() {
        assert_ordered_summary(&serde_json::json!({"TMIN": 60.0, "TAVG": 70.0, "TMAX": 80.0}));
        assert_ordered_summary(&serde_json::json!({"TMIN": 65.0, "TAVG": 65.0, "TMAX": 65.0}));
    }
}
