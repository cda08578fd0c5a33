use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::RoutingConfig;
use crate::domain::types::{Coordinate, CoordinateTable};
use crate::error::{Result, RoutingError};

/// One row of the lot table: `code,lon,lat`.
#[derive(Debug, Deserialize)]
struct LotRecord {
    code: String,
    lon: f64,
    lat: f64,
}

/// Reads a lot coordinate table from CSV with a `code,lon,lat` header.
pub fn read_coordinate_table<R: Read>(reader: R) -> Result<CoordinateTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut table = CoordinateTable::new();
    for row in reader.deserialize() {
        let record: LotRecord = row?;
        let coord = Coordinate::new(record.lon, record.lat);
        if record.code.is_empty() {
            return Err(RoutingError::InvalidConfig("lot table row without a code".to_string()));
        }
        if !coord.is_valid() {
            return Err(RoutingError::InvalidConfig(format!(
                "lot {} has invalid coordinate {}",
                record.code, coord
            )));
        }
        table.insert(&record.code, coord)?;
    }

    debug!("Read {} lots", table.len());
    Ok(table)
}

pub fn load_coordinate_table(path: impl AsRef<Path>) -> Result<CoordinateTable> {
    let path = path.as_ref();
    let table = read_coordinate_table(File::open(path)?)?;
    info!("Loaded {} lots from {}", table.len(), path.display());
    Ok(table)
}

/// Loads configuration and the lot table it points at.
pub fn setup() -> Result<(RoutingConfig, CoordinateTable)> {
    let config = RoutingConfig::from_env()?;
    let table = load_coordinate_table(&config.lots_csv_path)?;
    if table.is_empty() {
        return Err(RoutingError::InvalidConfig(format!(
            "lot table {} is empty",
            config.lots_csv_path
        )));
    }
    Ok((config, table))
}
