use serde::Serialize;

use crate::domain::types::Stop;
use crate::error::RoutingError;

/// Closed visiting order over one group: depot -> `order` -> depot.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub order: Vec<Stop>,
    pub distance_km: f64,
}

impl Tour {
    pub fn codes(&self) -> Vec<String> {
        self.order.iter().map(|s| s.code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Unordered two-way split, stored as positions into the code-sorted stop
/// list of a problem instance. `first` always holds position 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub first: Vec<usize>,
    pub second: Vec<usize>,
}

/// Winning split with both tours solved and its compactness metric.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSolution {
    pub partition: Partition,
    pub first_tour: Tour,
    pub second_tour: Tour,
    pub grouping_distance_km: f64,
}

impl PartitionSolution {
    pub fn routed_distance_km(&self) -> f64 {
        self.first_tour.distance_km + self.second_tour.distance_km
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRoute {
    #[serde(rename = "patente")]
    pub plate: String,
    #[serde(skip)]
    pub vehicle_index: usize,
    /// Assigned codes in request order, not visiting order.
    #[serde(rename = "lotes_asignados")]
    pub assigned: Vec<String>,
    #[serde(rename = "orden_optimo")]
    pub visit_order: Vec<String>,
    #[serde(rename = "distancia_km")]
    pub distance_km: f64,
    #[serde(skip)]
    pub estimated_minutes: u64,
    #[serde(rename = "tiempo_estimado")]
    pub estimated_time: String,
    pub geojson_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    #[serde(rename = "agrupacion_distancia_km")]
    pub grouping_distance_km: f64,
    #[serde(rename = "ruta_a")]
    pub route_a: VehicleRoute,
    #[serde(rename = "ruta_b")]
    pub route_b: VehicleRoute,
}

impl OptimizationResult {
    pub fn total_distance_km(&self) -> f64 {
        self.route_a.distance_km + self.route_b.distance_km
    }
}

/// Wire form of a solve call: either the success fields or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteResponse {
    Success(OptimizationResult),
    Failure { error: String },
}

impl RouteResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, RouteResponse::Failure { .. })
    }
}

impl From<Result<OptimizationResult, RoutingError>> for RouteResponse {
    fn from(result: Result<OptimizationResult, RoutingError>) -> Self {
        match result {
            Ok(solution) => RouteResponse::Success(solution),
            Err(err) => RouteResponse::Failure {
                error: err.to_string(),
            },
        }
    }
}
