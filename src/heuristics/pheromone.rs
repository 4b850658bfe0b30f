//! Pheromone trails and the combined choice information.

use crate::matrix::DistanceTable;

/// Symmetric matrix of pheromone intensities
#[derive(Debug, Clone)]
pub struct PheromoneField {
    pheromone: Vec<Vec<f64>>,
}

impl PheromoneField {
    /// Seed every cell with `tau0`
    pub fn new(n: usize, tau0: f64) -> Self {
        PheromoneField {
            pheromone: vec![vec![tau0; n]; n],
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.pheromone[i][j]
    }

    pub fn len(&self) -> usize {
        self.pheromone.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pheromone.is_empty()
    }

    /// Multiply every trail by `1 - rho`, walking the upper triangle and mirroring.
    /// Trails never decay below `f64::MIN_POSITIVE`.
    pub fn evaporate(&mut self, rho: f64) {
        let n = self.pheromone.len();
        for i in 0..n {
            for j in i..n {
                self.pheromone[i][j] = (self.pheromone[i][j] * (1.0 - rho)).max(f64::MIN_POSITIVE);
                self.pheromone[j][i] = self.pheromone[i][j];
            }
        }
    }

    /// Add `delta` on every consecutive edge of a closed tour
    pub fn deposit(&mut self, tour: &[usize], delta: f64) {
        for w in tour.windows(2) {
            let (j, k) = (w[0], w[1]);
            self.pheromone[j][k] += delta;
            self.pheromone[k][j] = self.pheromone[j][k];
        }
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.pheromone.len();
        (0..n).all(|i| (0..n).all(|j| self.pheromone[i][j] == self.pheromone[j][i]))
    }

    pub fn is_strictly_positive(&self) -> bool {
        self.pheromone.iter().flatten().all(|&t| t > 0.0 && t.is_finite())
    }
}

/// Per-edge attractiveness `tau^alpha * (1/d)^beta`.
///
/// Always rebuilt in full from the current trails; a zero distance yields zero.
#[derive(Debug, Clone)]
pub struct ChoiceInfo {
    choice: Vec<Vec<f64>>,
}

impl ChoiceInfo {
    pub fn compute(pheromone: &PheromoneField, dist: &DistanceTable, alpha: f64, beta: f64) -> Self {
        let mut info = ChoiceInfo { choice: Vec::new() };
        info.refresh(pheromone, dist, alpha, beta);
        info
    }

    /// Recompute every cell, reusing the allocation
    pub fn refresh(&mut self, pheromone: &PheromoneField, dist: &DistanceTable, alpha: f64, beta: f64) {
        let n = dist.len();
        self.choice.resize_with(n, Vec::new);

        for (i, row) in self.choice.iter_mut().enumerate() {
            row.clear();
            row.extend((0..n).map(|j| {
                let d = dist.get(i, j);
                if d > 0.0 {
                    pheromone.get(i, j).powf(alpha) * (1.0 / d).powf(beta)
                } else {
                    0.0
                }
            }));
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.choice[i][j]
    }
}
