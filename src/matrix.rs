//! Precomputed distance and neighbour structures.
//!
//! Both tables are built once from the instance and never change afterwards.

use crate::instance::TspInstance;
use ordered_float::OrderedFloat;

/// Pairwise distance matrix
#[derive(Debug, Clone)]
pub struct DistanceTable {
    dist: Vec<Vec<f64>>,
}

impl DistanceTable {
    /// Build the table, truncating every distance toward zero when `truncate` is set
    pub fn build(instance: &TspInstance, truncate: bool) -> Self {
        let n = instance.dimension();
        let mut dist = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i + 1..n {
                let d = instance.distance(i, j);
                let d = if truncate { d.trunc() } else { d };
                dist[i][j] = d;
                dist[j][i] = d;
            }
        }

        DistanceTable { dist }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.dist[i][j]
    }

    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// Length of a closed tour given as `n + 1` indices
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        tour.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

/// For each city, every other city ranked by ascending distance.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    neighbors: Vec<Vec<usize>>,
}

impl NeighborIndex {
    /// Rank neighbours by exact Euclidean distance; equal distances keep
    /// ascending city index.
    pub fn build(instance: &TspInstance) -> Self {
        let n = instance.dimension();
        let neighbors = (0..n)
            .map(|i| {
                let mut row: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                // stable sort keeps the index order on ties
                row.sort_by_key(|&j| OrderedFloat(instance.distance(i, j)));
                row
            })
            .collect();

        NeighborIndex { neighbors }
    }

    /// Ranked neighbours of `city`
    #[inline]
    pub fn of(&self, city: usize) -> &[usize] {
        &self.neighbors[city]
    }

    /// The `k` nearest neighbours of `city` (or all of them if `k` is larger)
    #[inline]
    pub fn nearest(&self, city: usize, k: usize) -> &[usize] {
        let row = &self.neighbors[city];
        &row[..k.min(row.len())]
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
