//! Result of a colony run and tour validation helpers.

use serde::{Deserialize, Serialize};

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcoSolution {
    /// Best closed tour found (`n + 1` indices, first and last equal)
    pub tour: Vec<usize>,
    /// Length of `tour` under the run's distance table
    pub length: f64,
    /// Nearest-neighbour tour length computed when seeding the trails
    pub nearest_neighbor_length: f64,
    /// Best length after each iteration
    pub history: Vec<f64>,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// Seed of the random stream
    pub seed: u64,
}

impl AcoSolution {
    /// Relative improvement of the best tour over the nearest-neighbour baseline, in percent
    pub fn improvement_over_baseline(&self) -> f64 {
        if self.nearest_neighbor_length > 0.0 {
            (self.nearest_neighbor_length - self.length) / self.nearest_neighbor_length * 100.0
        } else {
            0.0
        }
    }

    /// Iteration (1-based) at which the final best length was first reached
    pub fn iteration_of_best(&self) -> Option<usize> {
        self.history.iter().position(|&l| l == self.length).map(|i| i + 1)
    }
}

impl std::fmt::Display for AcoSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Length: {}", self.length)?;
        writeln!(f, "  Nearest neighbor: {:.2}", self.nearest_neighbor_length)?;
        writeln!(f, "  Improvement: {:.2}%", self.improvement_over_baseline())?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}

/// Check that `tour` is a closed Hamiltonian cycle over `n` cities
pub fn is_valid_tour(tour: &[usize], n: usize) -> bool {
    if n == 0 || tour.len() != n + 1 || tour[0] != tour[n] {
        return false;
    }

    let mut seen = vec![false; n];
    for &city in &tour[..n] {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
