use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::{debug, info, span, trace, Level};

use crate::config::constant::MAX_TOUR_STOPS;
use crate::domain::solution::{Partition, PartitionSolution};
use crate::domain::types::ProblemInstance;
use crate::error::{Result, RoutingError};
use crate::evaluation::grouping::grouping_distance;
use crate::utils::compare_distances;

use super::tour::solve_group;

/// Every unordered split of `n` stops into two non-empty groups whose sizes
/// fall in `[min_size, max_size]`. Position 0 always lands in `first`, which
/// keeps a split and its mirror from both appearing. Group sizes are capped at
/// [`MAX_TOUR_STOPS`], so counts above twice that yield nothing.
pub fn enumerate_partitions(n: usize, min_size: usize, max_size: usize) -> Vec<Partition> {
    let min_size = min_size.max(1);
    let max_size = max_size.min(MAX_TOUR_STOPS);
    if !splittable(n, min_size, max_size) {
        return Vec::new();
    }

    (1u32..(1u32 << (n - 1)))
        .filter_map(|mask| {
            let (second, first): (Vec<usize>, Vec<usize>) =
                (0..n).partition(|&i| i > 0 && mask & (1 << (i - 1)) != 0);
            let fits = |len: usize| (min_size..=max_size).contains(&len);
            (fits(first.len()) && fits(second.len())).then_some(Partition { first, second })
        })
        .collect()
}

/// Two groups within `[min_size, max_size]` can hold `n` stops at all.
fn splittable(n: usize, min_size: usize, max_size: usize) -> bool {
    n >= 2 * min_size && n <= 2 * max_size
}

/// Finds the split of `problem_instance.stops` with the least total routed
/// distance. Ties go to the smaller grouping distance, then to the smaller
/// code sequence of `first` followed by `second`.
pub fn partition(
    problem_instance: &ProblemInstance,
    min_size: usize,
    max_size: usize,
) -> Result<PartitionSolution> {
    let n = problem_instance.len();
    let search_span = span!(Level::DEBUG, "partition_search", stops = n);
    let _guard = search_span.enter();

    if max_size > MAX_TOUR_STOPS {
        return Err(RoutingError::InvalidConfig(format!(
            "group size {} exceeds the exact solver ceiling {}",
            max_size, MAX_TOUR_STOPS
        )));
    }

    let candidates = enumerate_partitions(n, min_size, max_size);
    if candidates.is_empty() {
        return Err(RoutingError::NoFeasiblePartition {
            count: n,
            min_group: min_size,
            max_group: max_size,
        });
    }
    debug!("Evaluating {} candidate splits", candidates.len());

    let scored: Vec<PartitionSolution> = candidates
        .into_par_iter()
        .map(|partition| score_partition(problem_instance, partition))
        .collect::<Result<_>>()?;

    let best = scored
        .into_iter()
        .min_by(compare_solutions)
        .ok_or(RoutingError::NoFeasiblePartition {
            count: n,
            min_group: min_size,
            max_group: max_size,
        })?;

    info!(
        "Best split {:?} | {:?}: routed {:.3} km, grouping {:.3} km",
        best.first_tour.codes(),
        best.second_tour.codes(),
        best.routed_distance_km(),
        best.grouping_distance_km
    );
    Ok(best)
}

fn score_partition(
    problem_instance: &ProblemInstance,
    partition: Partition,
) -> Result<PartitionSolution> {
    let first_tour = solve_group(problem_instance, &partition.first)?;
    let second_tour = solve_group(problem_instance, &partition.second)?;

    let dm = &problem_instance.distance_matrix;
    let nodes = |group: &[usize]| -> Vec<usize> {
        group.iter().map(|&s| ProblemInstance::node(s)).collect()
    };
    let grouping_distance_km = grouping_distance(&nodes(&partition.first), &nodes(&partition.second), dm);

    trace!(
        "split {:?} | {:?}: {:.3} + {:.3} km",
        partition.first,
        partition.second,
        first_tour.distance_km,
        second_tour.distance_km
    );

    Ok(PartitionSolution {
        partition,
        first_tour,
        second_tour,
        grouping_distance_km,
    })
}

fn compare_solutions(a: &PartitionSolution, b: &PartitionSolution) -> Ordering {
    compare_distances(a.routed_distance_km(), b.routed_distance_km())
        .then_with(|| compare_distances(a.grouping_distance_km, b.grouping_distance_km))
        .then_with(|| a.partition.first.cmp(&b.partition.first))
        .then_with(|| a.partition.second.cmp(&b.partition.second))
}
