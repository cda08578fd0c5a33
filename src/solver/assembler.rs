use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use url::form_urlencoded::byte_serialize;

use crate::config::constant::{DEPOT_NAME, GEOJSON_BASE_URL};
use crate::distance::geodesic::{estimate_minutes, format_duration};
use crate::domain::solution::{OptimizationResult, PartitionSolution, Tour, VehicleRoute};
use crate::domain::types::{Coordinate, Fleet, Vehicle};
use crate::error::Result;
use crate::utils::round2;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: (f64, f64) },
    LineString { coordinates: Vec<(f64, f64)> },
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
struct Feature {
    properties: BTreeMap<String, String>,
    geometry: Geometry,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
struct FeatureCollection {
    features: Vec<Feature>,
}

fn lng_lat(coord: &Coordinate) -> (f64, f64) {
    (coord.lon, coord.lat)
}

fn point(name: &str, coord: &Coordinate, symbol: &str) -> Feature {
    Feature {
        properties: BTreeMap::from([
            ("marker-symbol".to_string(), symbol.to_string()),
            ("name".to_string(), name.to_string()),
        ]),
        geometry: Geometry::Point {
            coordinates: lng_lat(coord),
        },
    }
}

/// GeoJSON for one vehicle: the closed path as a line string plus a marker
/// per stop and one for the depot.
fn tour_geojson(depot: &Coordinate, tour: &Tour, plate: &str) -> FeatureCollection {
    let path: Vec<(f64, f64)> = std::iter::once(lng_lat(depot))
        .chain(tour.order.iter().map(|stop| lng_lat(&stop.coord)))
        .chain(std::iter::once(lng_lat(depot)))
        .collect();

    let mut features = vec![Feature {
        properties: BTreeMap::from([
            ("name".to_string(), plate.to_string()),
            ("stroke-width".to_string(), "3".to_string()),
        ]),
        geometry: Geometry::LineString { coordinates: path },
    }];
    features.push(point(DEPOT_NAME, depot, "warehouse"));
    features.extend(
        tour.order
            .iter()
            .map(|stop| point(&stop.code, &stop.coord, "marker")),
    );

    FeatureCollection { features }
}

/// geojson.io link with the route embedded as a percent-encoded data URI.
pub fn geojson_link(depot: &Coordinate, tour: &Tour, plate: &str) -> Result<String> {
    let json = serde_json::to_string(&tour_geojson(depot, tour, plate))?;
    let encoded: String = byte_serialize(json.as_bytes()).collect();
    Ok(format!("{GEOJSON_BASE_URL}#data=data:application/json,{encoded}"))
}

fn vehicle_route(
    vehicle: &Vehicle,
    tour: &Tour,
    request_order: &[String],
    depot: &Coordinate,
    average_speed_kmh: f64,
) -> Result<VehicleRoute> {
    let visit_order = tour.codes();
    let assigned = request_order
        .iter()
        .filter(|code| visit_order.contains(*code))
        .cloned()
        .collect();
    let estimated_minutes = estimate_minutes(tour.distance_km, average_speed_kmh);

    Ok(VehicleRoute {
        plate: vehicle.plate.clone(),
        vehicle_index: vehicle.index,
        assigned,
        visit_order,
        distance_km: round2(tour.distance_km),
        estimated_minutes,
        estimated_time: format_duration(estimated_minutes),
        geojson_link: geojson_link(depot, tour, &vehicle.plate)?,
    })
}

/// Packages a solved split into the per-vehicle result.
///
/// Vehicle A takes the larger group. On equal sizes it takes the group
/// holding the smallest stop code.
pub fn assemble(
    solution: &PartitionSolution,
    fleet: &Fleet,
    request_order: &[String],
    depot: &Coordinate,
    average_speed_kmh: f64,
) -> Result<OptimizationResult> {
    let (tour_a, tour_b) = if solution.second_tour.len() > solution.first_tour.len() {
        (&solution.second_tour, &solution.first_tour)
    } else {
        (&solution.first_tour, &solution.second_tour)
    };

    let route_a = vehicle_route(&fleet.a, tour_a, request_order, depot, average_speed_kmh)?;
    let route_b = vehicle_route(&fleet.b, tour_b, request_order, depot, average_speed_kmh)?;
    debug!(
        "Assigned {} stops to {} and {} stops to {}",
        route_a.visit_order.len(),
        route_a.plate,
        route_b.visit_order.len(),
        route_b.plate
    );

    Ok(OptimizationResult {
        grouping_distance_km: round2(solution.grouping_distance_km),
        route_a,
        route_b,
    })
}
