pub mod fitness;
pub mod grouping;

pub use fitness::find_distance;
pub use grouping::grouping_distance;
