use std::collections::BTreeSet;

use bimodal_vrp::distance::distance;
use bimodal_vrp::fixtures::generate_random_inputs;
use bimodal_vrp::{solve_route_optimization, Coordinate, CoordinateTable, RoutingConfig, VehicleRoute};
use itertools::Itertools;
use proptest::prelude::*;

fn depot() -> Coordinate {
    RoutingConfig::default().depot
}

fn closed_length(table: &CoordinateTable, order: &[String]) -> f64 {
    let coords: Vec<Coordinate> = order.iter().map(|c| table.get(c).unwrap()).collect();
    let mut total = 0.0;
    for pair in coords.windows(2) {
        total += distance(&pair[0], &pair[1]);
    }
    distance(&depot(), &coords[0]) + total + distance(&coords[coords.len() - 1], &depot())
}

fn assert_valid_route(table: &CoordinateTable, route: &VehicleRoute) {
    let assigned: BTreeSet<&String> = route.assigned.iter().collect();
    let visited: BTreeSet<&String> = route.visit_order.iter().collect();
    assert_eq!(assigned, visited);
    assert_eq!(route.visit_order.len(), route.assigned.len());

    let length = closed_length(table, &route.visit_order);
    assert!((route.distance_km - (length * 100.0).round() / 100.0).abs() < 1e-9);

    for perm in route.visit_order.iter().cloned().permutations(route.visit_order.len()) {
        assert!(length <= closed_length(table, &perm) + 1e-9);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_lot_is_assigned_exactly_once(seed in any::<u64>(), n in 3usize..=7) {
        let (table, codes) = generate_random_inputs(depot(), 12, n, seed);
        let result = solve_route_optimization(&codes, &table, &RoutingConfig::default()).unwrap();

        let mut all: Vec<String> = result.route_a.assigned.clone();
        all.extend(result.route_b.assigned.iter().cloned());
        prop_assert_eq!(all.len(), n);
        let unique: BTreeSet<String> = all.into_iter().collect();
        let expected: BTreeSet<String> = codes.iter().cloned().collect();
        prop_assert_eq!(unique, expected);
        prop_assert!(!result.route_a.assigned.is_empty());
        prop_assert!(!result.route_b.assigned.is_empty());
    }

    #[test]
    fn tours_are_exact_and_consistent(seed in any::<u64>(), n in 3usize..=7) {
        let (table, codes) = generate_random_inputs(depot(), 12, n, seed);
        let result = solve_route_optimization(&codes, &table, &RoutingConfig::default()).unwrap();

        assert_valid_route(&table, &result.route_a);
        assert_valid_route(&table, &result.route_b);
        prop_assert!(result.route_a.visit_order.len() >= result.route_b.visit_order.len());
    }

    #[test]
    fn result_ignores_request_order(seed in any::<u64>(), n in 3usize..=7, shift in 0usize..7) {
        let (table, codes) = generate_random_inputs(depot(), 12, n, seed);
        let mut shuffled = codes.clone();
        shuffled.reverse();
        shuffled.rotate_left(shift % n);

        let config = RoutingConfig::default();
        let first = solve_route_optimization(&codes, &table, &config).unwrap();
        let second = solve_route_optimization(&shuffled, &table, &config).unwrap();

        prop_assert_eq!(first.grouping_distance_km, second.grouping_distance_km);
        prop_assert_eq!(&first.route_a.visit_order, &second.route_a.visit_order);
        prop_assert_eq!(&first.route_b.visit_order, &second.route_b.visit_order);
        prop_assert_eq!(first.route_a.distance_km, second.route_a.distance_km);
        prop_assert_eq!(first.route_b.distance_km, second.route_b.distance_km);
        prop_assert_eq!(&first.route_a.estimated_time, &second.route_a.estimated_time);
        prop_assert_eq!(&first.route_a.geojson_link, &second.route_a.geojson_link);
    }

    #[test]
    fn distance_is_symmetric(
        lon1 in -180.0f64..=180.0, lat1 in -90.0f64..=90.0,
        lon2 in -180.0f64..=180.0, lat2 in -90.0f64..=90.0,
    ) {
        let a = Coordinate::new(lon1, lat1);
        let b = Coordinate::new(lon2, lat2);
        let d = distance(&a, &b);
        prop_assert!(d >= 0.0);
        prop_assert_eq!(d, distance(&b, &a));
    }
}

#[test]
fn repeated_calls_are_identical() {
    let (table, codes) = generate_random_inputs(depot(), 14, 7, 2024);
    let config = RoutingConfig::default();
    let first = solve_route_optimization(&codes, &table, &config).unwrap();
    for _ in 0..3 {
        assert_eq!(solve_route_optimization(&codes, &table, &config).unwrap(), first);
    }
}
