pub mod init;
pub mod selection;

pub use init::{load_coordinate_table, read_coordinate_table, setup};
pub use selection::{parse_lot_list, Selection};
