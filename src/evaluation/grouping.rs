use crate::distance::matrix::DistanceMatrix;

use super::fitness::dist_between;

/// Compactness of one group: the sum of distances over every unordered pair
/// of its members. Independent of visiting order and of the depot.
pub fn group_spread(group: &[usize], dm: &DistanceMatrix) -> f64 {
    let mut total = 0.0;
    for (i, &from) in group.iter().enumerate() {
        for &to in &group[i + 1..] {
            total += dist_between(from, to, dm);
        }
    }
    total
}

/// Grouping distance of a two-way split: intra-group pairwise distance
/// summed over both groups.
pub fn grouping_distance(first: &[usize], second: &[usize], dm: &DistanceMatrix) -> f64 {
    group_spread(first, dm) + group_spread(second, dm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Coordinate;

    #[test]
    fn singleton_groups_have_zero_spread() {
        let dm = DistanceMatrix::from_points(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.1),
            Coordinate::new(0.0, 0.2),
        ]);
        assert_eq!(grouping_distance(&[1], &[2], &dm), 0.0);
    }

    #[test]
    fn counts_every_pair_once() {
        let dm = DistanceMatrix::from_points(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.1),
            Coordinate::new(0.0, 0.2),
            Coordinate::new(0.1, 0.2),
        ]);
        let expected = dm.get(1, 2) + dm.get(1, 3) + dm.get(2, 3);
        assert!((group_spread(&[1, 2, 3], &dm) - expected).abs() < 1e-12);
        assert!((grouping_distance(&[3, 1, 2], &[], &dm) - expected).abs() < 1e-12);
    }
}
