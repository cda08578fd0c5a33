//! Two-vehicle lot routing: splits a handful of delivery lots between two
//! vehicles leaving from one depot and orders each vehicle's round trip
//! exactly.

pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod setup;
pub mod solver;
pub mod utils;

pub use config::RoutingConfig;
pub use domain::solution::{OptimizationResult, RouteResponse, Tour, VehicleRoute};
pub use domain::types::{Coordinate, CoordinateTable, Fleet, Stop, Vehicle};
pub use error::{Result, RoutingError};
pub use solver::optimize::{solve_route_optimization, solve_route_response};
pub use solver::partition::partition;
pub use solver::service::RoutingService;
pub use solver::tour::solve_tour;
