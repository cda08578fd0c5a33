pub mod geodesic;
pub mod matrix;

pub use geodesic::{distance, estimate_minutes, estimate_time, format_duration};
pub use matrix::DistanceMatrix;
