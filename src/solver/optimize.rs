use std::collections::HashSet;

use tracing::{info, span, warn, Level};

use crate::config::RoutingConfig;
use crate::domain::solution::{OptimizationResult, RouteResponse};
use crate::domain::types::{CoordinateTable, ProblemInstance};
use crate::error::{Result, RoutingError};

use super::assembler::assemble;
use super::partition::partition;

/// Splits `stop_codes` between the two vehicles of `config.fleet` and
/// solves each vehicle's closed tour from the depot exactly.
///
/// Codes must be known to `table` and unique; the count must lie within
/// `config.min_stops..=config.max_stops`. The result depends only on the
/// set of codes, not on their order (apart from `assigned`, which echoes
/// request order).
pub fn solve_route_optimization(
    stop_codes: &[String],
    table: &CoordinateTable,
    config: &RoutingConfig,
) -> Result<OptimizationResult> {
    let solve_span = span!(Level::INFO, "solve_route_optimization", stops = stop_codes.len());
    let _guard = solve_span.enter();

    let count = stop_codes.len();
    if count < config.min_stops || count > config.max_stops {
        warn!("Rejected request with {} stops", count);
        return Err(RoutingError::InvalidInputSize {
            count,
            min: config.min_stops,
            max: config.max_stops,
        });
    }

    let mut seen = HashSet::with_capacity(count);
    if let Some(duplicate) = stop_codes.iter().find(|code| !seen.insert(code.as_str())) {
        return Err(RoutingError::DuplicateStop(duplicate.clone()));
    }

    let stops = table.resolve(stop_codes)?;
    let problem_instance = ProblemInstance::new(config.depot, stops);

    let best = partition(&problem_instance, config.min_group, config.max_group)?;
    let result = assemble(
        &best,
        &config.fleet,
        stop_codes,
        &config.depot,
        config.average_speed_kmh,
    )?;

    info!(
        "Routes ready: {} {:.2} km ({}), {} {:.2} km ({})",
        result.route_a.plate,
        result.route_a.distance_km,
        result.route_a.estimated_time,
        result.route_b.plate,
        result.route_b.distance_km,
        result.route_b.estimated_time
    );
    Ok(result)
}

/// Same as [`solve_route_optimization`], folded into the wire contract.
pub fn solve_route_response(
    stop_codes: &[String],
    table: &CoordinateTable,
    config: &RoutingConfig,
) -> RouteResponse {
    solve_route_optimization(stop_codes, table, config).into()
}
