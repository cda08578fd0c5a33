use crate::distance::matrix::DistanceMatrix;

/// Closed-tour length for `route`, a sequence of matrix nodes that excludes
/// the depot (node 0): depot -> route[0] -> ... -> route[k-1] -> depot.
pub fn find_distance(route: &[usize], dm: &DistanceMatrix) -> f64 {
    if route.is_empty() {
        return 0.0;
    }

    let warehouse_to_first_loc = dist_between(0, route[0], dm);
    let last_loc_to_warehouse = dist_between(route[route.len() - 1], 0, dm);

    let mut total_dist = 0.0;
    for pair in route.windows(2) {
        total_dist += dist_between(pair[0], pair[1], dm);
    }

    warehouse_to_first_loc + total_dist + last_loc_to_warehouse
}

pub fn dist_between(from_loc: usize, to_loc: usize, dm: &DistanceMatrix) -> f64 {
    dm.get(from_loc, to_loc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Coordinate;

    fn line_matrix() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.1),
            Coordinate::new(0.0, 0.2),
        ])
    }

    #[test]
    fn empty_route_has_no_length() {
        assert_eq!(find_distance(&[], &line_matrix()), 0.0);
    }

    #[test]
    fn single_stop_is_twice_the_leg() {
        let dm = line_matrix();
        assert_eq!(find_distance(&[2], &dm), 2.0 * dm.get(0, 2));
    }

    #[test]
    fn sums_depot_legs_and_inner_legs() {
        let dm = line_matrix();
        let expected = dm.get(0, 1) + dm.get(1, 2) + dm.get(2, 0);
        assert!((find_distance(&[1, 2], &dm) - expected).abs() < 1e-12);
    }
}
