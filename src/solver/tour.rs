use std::cmp::Ordering;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::config::constant::MAX_TOUR_STOPS;
use crate::domain::solution::Tour;
use crate::domain::types::{Coordinate, ProblemInstance, Stop};
use crate::error::{Result, RoutingError};
use crate::evaluation::fitness::find_distance;
use crate::utils::compare_distances;

/// Exact shortest closed tour over an arbitrary stop set, anchored at `depot`.
pub fn solve_tour(depot: Coordinate, stops: &[Stop]) -> Result<Tour> {
    let problem_instance = ProblemInstance::new(depot, stops.to_vec());
    let group: Vec<usize> = (0..problem_instance.len()).collect();
    solve_group(&problem_instance, &group)
}

/// Exact shortest closed tour over `group` (positions into
/// `problem_instance.stops`) by enumerating every permutation.
///
/// Among equally short permutations the lexicographically smallest code
/// sequence wins.
pub fn solve_group(problem_instance: &ProblemInstance, group: &[usize]) -> Result<Tour> {
    if group.is_empty() || group.len() > MAX_TOUR_STOPS {
        return Err(RoutingError::InvalidInputSize {
            count: group.len(),
            min: 1,
            max: MAX_TOUR_STOPS,
        });
    }

    // Stops are code-sorted, so sorted positions compare like code sequences.
    let mut nodes: Vec<usize> = group.iter().map(|&s| ProblemInstance::node(s)).collect();
    nodes.sort_unstable();

    let dm = &problem_instance.distance_matrix;
    let mut best_route = nodes.clone();
    let mut best_distance = find_distance(&best_route, dm);

    for candidate in nodes.iter().copied().permutations(nodes.len()) {
        let candidate_distance = find_distance(&candidate, dm);
        let better = match compare_distances(candidate_distance, best_distance) {
            Ordering::Less => true,
            Ordering::Equal => candidate < best_route,
            Ordering::Greater => false,
        };
        if better {
            trace!("tour improved to {:.4} km: {:?}", candidate_distance, candidate);
            best_distance = candidate_distance;
            best_route = candidate;
        }
    }

    let order: Vec<Stop> = best_route
        .iter()
        .map(|&node| problem_instance.stops[node - 1].clone())
        .collect();
    debug!(
        "Solved tour over {} stops: {:.3} km",
        order.len(),
        best_distance
    );

    Ok(Tour {
        order,
        distance_km: best_distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::geodesic::distance;

    fn depot() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    #[test]
    fn single_stop_goes_out_and_back() {
        let stop = Stop::new("A05", 0.0, 0.1);
        let tour = solve_tour(depot(), &[stop.clone()]).unwrap();
        assert_eq!(tour.codes(), vec!["A05"]);
        assert_eq!(tour.distance_km, 2.0 * distance(&depot(), &stop.coord));
    }

    #[test]
    fn mirrored_tours_resolve_to_smallest_code_sequence() {
        // Any tour and its reverse have the same length.
        let stops = vec![
            Stop::new("C", 0.1, 0.1),
            Stop::new("A", 0.1, -0.1),
            Stop::new("B", 0.2, 0.0),
        ];
        let tour = solve_tour(depot(), &stops).unwrap();
        assert_eq!(tour.codes(), vec!["A", "B", "C"]);
    }

    #[test]
    fn finds_the_shortest_order_on_a_line() {
        let stops = vec![
            Stop::new("FAR", 0.0, 0.3),
            Stop::new("MID", 0.0, 0.2),
            Stop::new("NEAR", 0.0, 0.1),
        ];
        let tour = solve_tour(depot(), &stops).unwrap();
        let expected = 2.0 * distance(&depot(), &stops[0].coord);
        assert!((tour.distance_km - expected).abs() < 1e-9);
        // FAR, MID, NEAR and NEAR, MID, FAR tie; FAR sorts first.
        assert_eq!(tour.codes(), vec!["FAR", "MID", "NEAR"]);
    }

    #[test]
    fn beats_or_matches_every_permutation() {
        let stops = vec![
            Stop::new("A", 0.05, 0.12),
            Stop::new("B", -0.08, 0.03),
            Stop::new("C", 0.11, -0.04),
            Stop::new("D", -0.02, -0.09),
            Stop::new("E", 0.07, 0.07),
        ];
        let pi = ProblemInstance::new(depot(), stops);
        let group: Vec<usize> = (0..pi.len()).collect();
        let tour = solve_group(&pi, &group).unwrap();

        for perm in (1..=5usize).permutations(5) {
            assert!(tour.distance_km <= find_distance(&perm, &pi.distance_matrix) + 1e-9);
        }
    }

    #[test]
    fn rejects_empty_and_oversized_groups() {
        assert!(matches!(
            solve_tour(depot(), &[]),
            Err(RoutingError::InvalidInputSize { count: 0, .. })
        ));

        let stops: Vec<Stop> = (0..=MAX_TOUR_STOPS)
            .map(|i| Stop::new(format!("S{i}"), 0.01 * i as f64, 0.02))
            .collect();
        assert!(matches!(
            solve_tour(depot(), &stops),
            Err(RoutingError::InvalidInputSize { count, .. }) if count == MAX_TOUR_STOPS + 1
        ));
    }
}
