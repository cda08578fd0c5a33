use std::collections::BTreeMap;
use std::fmt;

use crate::distance::matrix::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub code: String,
    pub coord: Coordinate,
}

impl Stop {
    pub fn new(code: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            code: code.into(),
            coord: Coordinate::new(lon, lat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub plate: String,
    pub index: usize,
}

impl Vehicle {
    pub fn new(plate: impl Into<String>, index: usize) -> Self {
        Self {
            plate: plate.into(),
            index,
        }
    }
}

/// The two vehicle slots. `a` always receives the preferred half of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    pub a: Vehicle,
    pub b: Vehicle,
}

impl Fleet {
    pub fn new(a: Vehicle, b: Vehicle) -> Self {
        Self { a, b }
    }
}

/// Lot code -> coordinate lookup. Codes are stored upper-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    entries: BTreeMap<String, Coordinate>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: &str, coord: Coordinate) -> Result<()> {
        let code = normalize_code(code);
        if self.entries.contains_key(&code) {
            return Err(RoutingError::DuplicateStop(code));
        }
        self.entries.insert(code, coord);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<Coordinate> {
        self.entries.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolves codes to stops, failing on the first code that is missing.
    pub fn resolve(&self, codes: &[String]) -> Result<Vec<Stop>> {
        codes
            .iter()
            .map(|code| {
                self.get(code)
                    .map(|coord| Stop {
                        code: code.clone(),
                        coord,
                    })
                    .ok_or_else(|| RoutingError::UnknownStop(code.clone()))
            })
            .collect()
    }
}

/// Collects already-vetted stops. Codes are normalized like [`CoordinateTable::insert`],
/// but a repeated code replaces the earlier entry instead of failing; load
/// untrusted rows through `insert`.
impl FromIterator<Stop> for CoordinateTable {
    fn from_iter<I: IntoIterator<Item = Stop>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|stop| (normalize_code(&stop.code), stop.coord))
                .collect(),
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// One solve request: the depot and the stops, sorted by code, with their
/// distance matrix. Matrix index 0 is the depot and index `i + 1` is `stops[i]`.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub depot: Coordinate,
    pub stops: Vec<Stop>,
    pub distance_matrix: DistanceMatrix,
}

impl ProblemInstance {
    pub fn new(depot: Coordinate, mut stops: Vec<Stop>) -> Self {
        stops.sort_by(|a, b| a.code.cmp(&b.code));
        let points: Vec<Coordinate> = std::iter::once(depot)
            .chain(stops.iter().map(|s| s.coord))
            .collect();
        Self {
            depot,
            distance_matrix: DistanceMatrix::from_points(&points),
            stops,
        }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Matrix index of the stop at position `stop` in [`ProblemInstance::stops`].
    pub fn node(stop: usize) -> usize {
        stop + 1
    }

    pub fn code(&self, stop: usize) -> &str {
        &self.stops[stop].code
    }
}
