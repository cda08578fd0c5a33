use std::cmp::Ordering;

/// Tolerance for treating two route lengths (km) as a tie.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// Orders two distances, treating values closer than [`DISTANCE_EPSILON`] as equal.
pub fn compare_distances(a: f64, b: f64) -> Ordering {
    if (a - b).abs() < DISTANCE_EPSILON {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Rounds half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
