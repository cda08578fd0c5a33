use std::cmp::Ordering;

use crate::config::constant::EARTH_RADIUS_KM;
use crate::domain::types::Coordinate;

/// Great-circle (haversine) distance in kilometers.
///
/// The pair is put in a canonical order before evaluation, so swapping the
/// arguments yields a bit-identical result.
pub fn distance(p1: &Coordinate, p2: &Coordinate) -> f64 {
    if p1 == p2 {
        return 0.0;
    }

    let (a, b) = match p1
        .lon
        .total_cmp(&p2.lon)
        .then_with(|| p1.lat.total_cmp(&p2.lat))
    {
        Ordering::Greater => (p2, p1),
        _ => (p1, p2),
    };

    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = (s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2).min(1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Travel time in whole minutes at a constant average speed.
pub fn estimate_minutes(distance_km: f64, average_speed_kmh: f64) -> u64 {
    if distance_km <= 0.0 || average_speed_kmh <= 0.0 {
        return 0;
    }
    (distance_km / average_speed_kmh * 60.0).round() as u64
}

/// `H:MM`, hours are not wrapped at 24.
pub fn format_duration(minutes: u64) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

pub fn estimate_time(distance_km: f64, average_speed_kmh: f64) -> String {
    format_duration(estimate_minutes(distance_km, average_speed_kmh))
}
