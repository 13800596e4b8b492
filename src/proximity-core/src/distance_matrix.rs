use geo::{Distance, Haversine, Point};
use tracing::instrument;

use crate::{Position, Result, error::error::InvalidPositionSnafu};

static METERS_PER_KILOMETER: f64 = 1000.0;

/// Square, symmetric matrix of great-circle distances in kilometers between every pair of
/// reports in a batch. Entries are stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Validates all positions before computing any distance, a single invalid position fails
    /// the whole batch.
    #[instrument(skip_all, fields(num_positions = positions.len()))]
    pub fn build(positions: &[Position]) -> Result<Self> {
        if let Some((index, position)) = positions.iter().enumerate().find(|(_, p)| !p.is_valid())
        {
            return InvalidPositionSnafu {
                index,
                latitude: position.latitude,
                longitude: position.longitude,
            }
            .fail();
        }

        let size = positions.len();
        let points: Vec<Point<f64>> = positions.iter().map(|p| Point::from(*p)).collect();

        let mut distances = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let distance = haversine_km(points[i], points[j]);
                distances[i * size + j] = distance;
                distances[j * size + i] = distance;
            }
        }

        Ok(Self { size, distances })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.size && j < self.size).then(|| self.distances[i * self.size + j])
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.size).then(|| &self.distances[i * self.size..(i + 1) * self.size])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // `chunks_exact` panics on a zero chunk size
        self.distances.chunks_exact(self.size.max(1))
    }
}

/// Haversine distance on a sphere with the mean Earth radius (6371.0088 km).
pub fn haversine_km(from: Point<f64>, to: Point<f64>) -> f64 {
    Haversine.distance(from, to) / METERS_PER_KILOMETER
}
