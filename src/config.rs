use std::env;
use std::str::FromStr;

use dotenv::dotenv;
use tracing::{debug, info};

use crate::domain::types::{Coordinate, Fleet, Vehicle};
use crate::error::{Result, RoutingError};

pub mod constant {
    pub(crate) const MIN_STOPS: usize = 3;
    pub(crate) const MAX_STOPS: usize = 7;
    pub(crate) const MIN_GROUP: usize = 1;
    pub(crate) const MAX_GROUP: usize = 7;
    /// Largest subset the exact tour solver accepts (7! = 5040 permutations).
    pub const MAX_TOUR_STOPS: usize = 7;
    pub(crate) const AVERAGE_SPEED_KMH: f64 = 40.0;
    /// Mean Earth radius (IUGG), kilometers.
    pub const EARTH_RADIUS_KM: f64 = 6371.0088;
    pub(crate) const DEPOT_LON: f64 = -65.1553;
    pub(crate) const DEPOT_LAT: f64 = -26.8934;
    pub(crate) const DEPOT_NAME: &str = "INGENIO";
    pub(crate) const VEHICLE_A: &str = "AF 123 KD";
    pub(crate) const VEHICLE_B: &str = "AE 987 JT";
    pub(crate) const LOTS_CSV_PATH: &str = "data/lotes.csv";
    pub const GEOJSON_BASE_URL: &str = "http://geojson.io/";
}

/// Runtime settings of the optimizer. Defaults come from [`constant`], every
/// field can be overridden through a `ROUTING_*` environment variable.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    pub min_stops: usize,
    pub max_stops: usize,
    pub min_group: usize,
    pub max_group: usize,
    pub average_speed_kmh: f64,
    pub depot: Coordinate,
    pub fleet: Fleet,
    pub lots_csv_path: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            min_stops: constant::MIN_STOPS,
            max_stops: constant::MAX_STOPS,
            min_group: constant::MIN_GROUP,
            max_group: constant::MAX_GROUP,
            average_speed_kmh: constant::AVERAGE_SPEED_KMH,
            depot: Coordinate::new(constant::DEPOT_LON, constant::DEPOT_LAT),
            fleet: Fleet::new(
                Vehicle::new(constant::VEHICLE_A, 0),
                Vehicle::new(constant::VEHICLE_B, 1),
            ),
            lots_csv_path: constant::LOTS_CSV_PATH.to_string(),
        }
    }
}

impl RoutingConfig {
    /// Loads `.env` (if present) and applies overrides on top of the defaults.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let mut config = Self::default();

        if let Some(v) = read_var("ROUTING_MIN_STOPS")? {
            config.min_stops = v;
        }
        if let Some(v) = read_var("ROUTING_MAX_STOPS")? {
            config.max_stops = v;
        }
        if let Some(v) = read_var("ROUTING_MIN_GROUP")? {
            config.min_group = v;
        }
        if let Some(v) = read_var("ROUTING_MAX_GROUP")? {
            config.max_group = v;
        }
        if let Some(v) = read_var("ROUTING_AVERAGE_SPEED_KMH")? {
            config.average_speed_kmh = v;
        }
        if let Some(v) = read_var("ROUTING_DEPOT_LON")? {
            config.depot.lon = v;
        }
        if let Some(v) = read_var("ROUTING_DEPOT_LAT")? {
            config.depot.lat = v;
        }
        if let Ok(plate) = env::var("ROUTING_VEHICLE_A") {
            config.fleet.a = Vehicle::new(plate.trim(), 0);
        }
        if let Ok(plate) = env::var("ROUTING_VEHICLE_B") {
            config.fleet.b = Vehicle::new(plate.trim(), 1);
        }
        if let Ok(path) = env::var("ROUTING_LOTS_CSV") {
            config.lots_csv_path = path;
        }

        config.validate()?;
        info!(
            "Loaded routing config: stops {}..={}, groups {}..={}, speed {} km/h",
            config.min_stops,
            config.max_stops,
            config.min_group,
            config.max_group,
            config.average_speed_kmh
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_stops > self.max_stops {
            return Err(invalid(format!(
                "min_stops ({}) exceeds max_stops ({})",
                self.min_stops, self.max_stops
            )));
        }
        if self.min_group == 0 {
            return Err(invalid("min_group must be at least 1"));
        }
        if self.min_group > self.max_group {
            return Err(invalid(format!(
                "min_group ({}) exceeds max_group ({})",
                self.min_group, self.max_group
            )));
        }
        if self.max_group > constant::MAX_TOUR_STOPS {
            return Err(invalid(format!(
                "max_group ({}) exceeds the exact solver ceiling ({})",
                self.max_group,
                constant::MAX_TOUR_STOPS
            )));
        }
        if self.max_stops > 2 * constant::MAX_TOUR_STOPS {
            return Err(invalid(format!(
                "max_stops ({}) exceeds {}",
                self.max_stops,
                2 * constant::MAX_TOUR_STOPS
            )));
        }
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(invalid(format!(
                "average speed must be positive, got {}",
                self.average_speed_kmh
            )));
        }
        if !self.depot.is_valid() {
            return Err(invalid(format!("depot coordinate {} is not valid", self.depot)));
        }
        Ok(())
    }
}

fn read_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => {
            debug!("Override {} = {}", name, raw);
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|_| invalid(format!("{name}: cannot parse '{raw}'")))
        }
        Err(_) => Ok(None),
    }
}

fn invalid(message: impl Into<String>) -> RoutingError {
    RoutingError::InvalidConfig(message.into())
}
