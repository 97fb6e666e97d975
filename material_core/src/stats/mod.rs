//! Statistics helpers - medians, clamping, and bounded normalization

mod batch;
mod bounds;

pub use batch::{BatchStatistics, FALLBACK_STRENGTH_RATIO, GLOBAL_CLASS};
pub use bounds::{Bounds, NormalizationBounds};
pub(crate) use batch::specific_stiffness;

/// Median of the finite values in `values`
///
/// Even-length inputs average the two middle values. Returns `None` when
/// there is nothing to take the median of.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Clamp `value` into `[min, max]`
///
/// Unlike `f64::clamp` this never panics; a NaN input collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp into the unit interval
pub fn clamp01(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Map `value` onto `[0, 1]` between `a` and `b`
///
/// Returns 0 when any input is missing or the range is degenerate.
pub fn normalize(value: Option<f64>, a: Option<f64>, b: Option<f64>) -> f64 {
    match (value, a, b) {
        (Some(value), Some(a), Some(b)) => Bounds { a, b }.normalize(value),
        _ => 0.0,
    }
}

/// Most decimal places `round_to` honours; f64 carries about 15-17
/// significant digits
pub const MAX_ROUND_PLACES: u32 = 15;

/// Round to a fixed number of decimal places
///
/// `places` above `MAX_ROUND_PLACES` are capped. Values too large to scale
/// come back unchanged.
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places.min(MAX_ROUND_PLACES) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[100.0, 110.0]), Some(105.0));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[f64::NAN]), None);
    }

    #[test]
    fn test_median_skips_non_finite() {
        assert_eq!(median(&[1.0, f64::NAN, 3.0, f64::INFINITY]), Some(2.0));
    }

    #[test]
    fn test_clamp() {
        assert!((clamp(1.7, 0.5, 1.5) - 1.5).abs() < f64::EPSILON);
        assert!((clamp(0.2, 0.5, 1.5) - 0.5).abs() < f64::EPSILON);
        assert!((clamp01(f64::NAN) - 0.0).abs() < f64::EPSILON);
        assert!((clamp01(-0.3) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize() {
        assert!((normalize(Some(15.0), Some(10.0), Some(20.0)) - 0.5).abs() < f64::EPSILON);
        assert!((normalize(Some(25.0), Some(10.0), Some(20.0)) - 1.0).abs() < f64::EPSILON);
        assert!((normalize(Some(5.0), Some(10.0), Some(20.0)) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_degenerate() {
        assert_eq!(normalize(Some(10.0), Some(10.0), Some(10.0)), 0.0);
        assert_eq!(normalize(None, Some(0.0), Some(1.0)), 0.0);
        assert_eq!(normalize(Some(0.5), None, Some(1.0)), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(0.123456789, 5) - 0.12346).abs() < 1e-12);
        assert!((round_to(2.5, 0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_to_huge_places() {
        assert!((round_to(0.123456789, 400) - 0.123456789).abs() < 1e-12);
        assert!((round_to(0.0, u32::MAX) - 0.0).abs() < f64::EPSILON);
        assert!((round_to(1.0, 400) - 1.0).abs() < f64::EPSILON);
        assert_eq!(round_to(f64::MAX, 15), f64::MAX);
    }
}
