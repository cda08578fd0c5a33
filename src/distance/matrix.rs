use tracing::trace;

use super::geodesic::distance;
use crate::domain::types::Coordinate;

/// Symmetric table of geodesic distances (km) between a fixed list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_points(points: &[Coordinate]) -> Self {
        let size = points.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let d = distance(&points[i], &points[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }

        trace!("Built {}x{} distance matrix", size, size);
        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.size + to]
    }
}
