pub mod assembler;
pub mod optimize;
pub mod partition;
pub mod service;
pub mod tour;
