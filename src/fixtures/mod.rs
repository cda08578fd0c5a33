pub mod data_generator;

pub use data_generator::{generate_lot_table, generate_random_inputs, random_selection};
