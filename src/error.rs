use std::time::Duration;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RoutingError {
    #[error("expected between {min} and {max} stops, got {count}")]
    InvalidInputSize { count: usize, min: usize, max: usize },
    #[error("{count} stops cannot be split into two groups of {min_group} to {max_group} stops")]
    NoFeasiblePartition {
        count: usize,
        min_group: usize,
        max_group: usize,
    },
    #[error("unknown stop code: {0}")]
    UnknownStop(String),
    #[error("duplicate stop code: {0}")]
    DuplicateStop(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("optimization did not finish within {0:?}")]
    Timeout(Duration),
    #[error("optimization task failed: {0}")]
    TaskFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
