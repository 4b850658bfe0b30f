use crate::instance::TspInstance;
use crate::matrix::NeighborIndex;

/// Nearest Neighbor Heuristic
///
/// Builds a tour from city 0 by repeatedly visiting the nearest unvisited city,
/// then returns to city 0. Used to seed the pheromone field and as the baseline
/// reported next to the colony's best tour.
pub struct NearestNeighborHeuristic;

/// A closed greedy tour and its exact Euclidean length
#[derive(Debug, Clone, PartialEq)]
pub struct NearestNeighborTour {
    /// `n + 1` indices, first and last equal
    pub tour: Vec<usize>,
    pub length: f64,
}

impl NearestNeighborHeuristic {
    pub fn new() -> Self {
        NearestNeighborHeuristic
    }

    /// Returns `None` for an empty instance
    pub fn construct(&self, instance: &TspInstance, neighbors: &NeighborIndex) -> Option<NearestNeighborTour> {
        let n = instance.dimension();
        if n == 0 {
            return None;
        }

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n + 1);
        let mut length = 0.0;

        let mut current = 0;
        visited[current] = true;
        tour.push(current);

        while tour.len() < n {
            // the ranked list covers every other city, so an unvisited one exists
            let Some(&next) = neighbors.of(current).iter().find(|&&c| !visited[c]) else {
                break;
            };
            length += instance.distance(current, next);
            visited[next] = true;
            tour.push(next);
            current = next;
        }

        length += instance.distance(current, 0);
        tour.push(0);

        Some(NearestNeighborTour { tour, length })
    }
}

impl Default for NearestNeighborHeuristic {
    fn default() -> Self {
        Self::new()
    }
}
