use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::types::{Coordinate, CoordinateTable, Stop};

/// Random lots scattered within `radius_deg` of `center`, coded `L00`, `L01`, ...
/// The same seed always yields the same table.
pub fn generate_lot_table(center: Coordinate, count: usize, radius_deg: f64, seed: u64) -> CoordinateTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let lon = center.lon + rng.gen_range(-radius_deg..=radius_deg);
            let lat = center.lat + rng.gen_range(-radius_deg..=radius_deg);
            Stop::new(format!("L{i:02}"), lon, lat)
        })
        .collect()
}

/// Picks `list_size` distinct codes from `table` in random order.
pub fn random_selection(table: &CoordinateTable, list_size: usize, seed: u64) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let all: Vec<&str> = table.codes().collect();
    let mut chosen: Vec<String> = Vec::with_capacity(list_size);

    while chosen.len() < list_size.min(all.len()) {
        let candidate = all[rng.gen_range(0..all.len())];
        if !chosen.iter().any(|c| c == candidate) {
            chosen.push(candidate.to_string());
        }
    }
    chosen
}

/// Generates a lot table and a request drawn from it.
pub fn generate_random_inputs(
    center: Coordinate,
    table_size: usize,
    list_size: usize,
    seed: u64,
) -> (CoordinateTable, Vec<String>) {
    let table = generate_lot_table(center, table_size, 0.15, seed);
    let selection = random_selection(&table, list_size, seed.wrapping_add(1));
    info!(
        "Generated {} lots, selected {} (seed {})",
        table.len(),
        selection.len(),
        seed
    );
    (table, selection)
}
