//! Ant System for the Euclidean TSP.
//!
//! One ant per city builds a tour each iteration using roulette-wheel selection
//! over nearest-neighbour candidate lists. All trails then evaporate and every
//! ant deposits `1 / L` on the edges of its tour.

use crate::error::{Result, SolverError};
use crate::heuristics::ant::{Ant, ConstructionEngine};
use crate::heuristics::construction::NearestNeighborHeuristic;
use crate::heuristics::pheromone::{ChoiceInfo, PheromoneField};
use crate::instance::TspInstance;
use crate::matrix::{DistanceTable, NeighborIndex};
use crate::solution::AcoSolution;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ACO configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ACOConfig {
    /// Pheromone importance (alpha)
    pub alpha: f64,
    /// Heuristic importance (beta)
    pub beta: f64,
    /// Evaporation rate (rho)
    pub evaporation_rate: f64,
    /// Number of iterations
    pub max_iterations: usize,
    /// Random seed
    pub seed: u64,
    /// Size of each city's roulette candidate list (`None` = all other cities)
    pub neighbor_list_len: Option<usize>,
    /// Truncate distances toward zero before building the distance table
    pub truncate_distances: bool,
}

impl Default for ACOConfig {
    fn default() -> Self {
        ACOConfig {
            alpha: 1.0,
            beta: 5.0,
            evaporation_rate: 0.5,
            max_iterations: 100,
            seed: 42,
            neighbor_list_len: None,
            truncate_distances: true,
        }
    }
}

impl ACOConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(SolverError::Config(format!(
                "evaporation rate must lie in (0, 1), got {}", self.evaporation_rate
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::Config("iteration count must be positive".to_string()));
        }
        if !self.alpha.is_finite() || !self.beta.is_finite() {
            return Err(SolverError::Config("alpha and beta must be finite".to_string()));
        }
        if self.neighbor_list_len == Some(0) {
            return Err(SolverError::Config("neighbor list length must be positive".to_string()));
        }
        Ok(())
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Uninitialized,
    Ready,
    Iterating,
    Done,
}

/// Best tour seen so far. Only a strictly shorter tour replaces it.
#[derive(Debug, Clone)]
pub struct BestTour {
    pub tour: Vec<usize>,
    pub length: f64,
}

impl BestTour {
    pub fn new() -> Self {
        BestTour { tour: Vec::new(), length: f64::INFINITY }
    }

    /// Scan the ants in order; returns true when the incumbent changed
    pub fn observe(&mut self, ants: &[Ant]) -> bool {
        let mut improved = false;
        for ant in ants {
            if ant.tour_length < self.length {
                self.length = ant.tour_length;
                self.tour.clone_from(&ant.tour);
                improved = true;
            }
        }
        improved
    }
}

impl Default for BestTour {
    fn default() -> Self {
        Self::new()
    }
}

/// Ant System solver
pub struct AntSystem {
    config: ACOConfig,
    instance: TspInstance,
    state: SolverState,
    dist: DistanceTable,
    neighbors: NeighborIndex,
    pheromone: PheromoneField,
    choice: ChoiceInfo,
    ants: Vec<Ant>,
    best: BestTour,
    nearest_neighbor_length: f64,
    tau0: f64,
    history: Vec<f64>,
    iteration: usize,
    rng: ChaCha8Rng,
}

impl AntSystem {
    /// Precompute distances, neighbour lists and the seeded trails.
    ///
    /// An empty instance goes straight to `Done`.
    pub fn new(instance: TspInstance, config: ACOConfig) -> Result<Self> {
        config.validate()?;

        let n = instance.dimension();
        let dist = DistanceTable::build(&instance, config.truncate_distances);
        let neighbors = NeighborIndex::build(&instance);

        let nearest_neighbor_length = NearestNeighborHeuristic::new()
            .construct(&instance, &neighbors)
            .map(|nn| nn.length)
            .unwrap_or(0.0);
        let tau0 = if nearest_neighbor_length > 0.0 { 1.0 / nearest_neighbor_length } else { 1.0 };

        let pheromone = PheromoneField::new(n, tau0);
        let choice = ChoiceInfo::compute(&pheromone, &dist, config.alpha, config.beta);
        let ants = (0..n).map(|_| Ant::new(n)).collect();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        let mut solver = AntSystem {
            config,
            instance,
            state: SolverState::Uninitialized,
            dist,
            neighbors,
            pheromone,
            choice,
            ants,
            best: BestTour::new(),
            nearest_neighbor_length,
            tau0,
            history: Vec::new(),
            iteration: 0,
            rng,
        };
        solver.state = if n == 0 { SolverState::Done } else { SolverState::Ready };

        log::info!(
            "Initialized ant system on {:?}: {} cities, nearest neighbor length {:.2}, tau0 {:.6e}",
            solver.instance.name, n, nearest_neighbor_length, tau0
        );

        Ok(solver)
    }

    /// Run one iteration: construction, best tracking, trail update.
    ///
    /// Returns true when the best tour improved. Does nothing once the
    /// configured number of iterations has been reached or the instance is empty.
    pub fn iterate(&mut self) -> bool {
        match self.state {
            SolverState::Ready => self.state = SolverState::Iterating,
            SolverState::Iterating => {}
            SolverState::Uninitialized | SolverState::Done => return false,
        }

        {
            let engine = ConstructionEngine::new(
                &self.dist,
                &self.neighbors,
                &self.choice,
                self.config.neighbor_list_len,
            );
            engine.construct(&mut self.ants, &mut self.rng);
        }

        let improved = self.best.observe(&self.ants);
        if improved {
            log::info!("Iteration {}: new best tour length {}", self.iteration + 1, self.best.length);
        }

        self.update_pheromone_trails();

        self.iteration += 1;
        self.history.push(self.best.length);
        log::debug!("Iteration {} done, best {}", self.iteration, self.best.length);

        if self.iteration >= self.config.max_iterations {
            self.state = SolverState::Done;
        }

        improved
    }

    /// Evaporate every trail, let each ant deposit `1 / L`, then rebuild the choice table
    fn update_pheromone_trails(&mut self) {
        self.pheromone.evaporate(self.config.evaporation_rate);

        for ant in &self.ants {
            if ant.tour_length > 0.0 {
                self.pheromone.deposit(&ant.tour, 1.0 / ant.tour_length);
            } else {
                log::debug!("Skipping deposit for zero-length tour {:?}", ant.tour);
            }
        }

        self.choice.refresh(&self.pheromone, &self.dist, self.config.alpha, self.config.beta);
    }

    /// Run ACO algorithm to completion.
    ///
    /// Returns `None` for an empty instance.
    pub fn run(&mut self) -> Option<AcoSolution> {
        if self.instance.is_empty() {
            return None;
        }

        let start = std::time::Instant::now();
        while self.state != SolverState::Done {
            self.iterate();
        }

        let mut solution = self.best_solution()?;
        solution.computation_time = start.elapsed().as_secs_f64();

        log::info!(
            "Finished after {} iterations: best {} vs nearest neighbor {:.2}",
            self.iteration, self.best.length, self.nearest_neighbor_length
        );

        Some(solution)
    }

    /// Get best solution found, if any iteration has run
    pub fn best_solution(&self) -> Option<AcoSolution> {
        if self.best.tour.is_empty() {
            return None;
        }

        Some(AcoSolution {
            tour: self.best.tour.clone(),
            length: self.best.length,
            nearest_neighbor_length: self.nearest_neighbor_length,
            history: self.history.clone(),
            algorithm: "AntSystem".to_string(),
            computation_time: 0.0,
            iterations: self.iteration,
            seed: self.config.seed,
        })
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn config(&self) -> &ACOConfig {
        &self.config
    }

    pub fn instance(&self) -> &TspInstance {
        &self.instance
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.dist
    }

    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn best(&self) -> &BestTour {
        &self.best
    }

    pub fn nearest_neighbor_length(&self) -> f64 {
        self.nearest_neighbor_length
    }

    pub fn tau0(&self) -> f64 {
        self.tau0
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::is_valid_tour;

    fn create_test_instance() -> TspInstance {
        TspInstance::from_coordinates(
            "test",
            &[(0, 0), (4, 9), (12, 3), (7, 7), (15, 15), (1, 14), (9, 0), (18, 4), (3, 3), (11, 11)],
        )
    }

    #[test]
    fn test_aco() {
        let instance = create_test_instance();
        let config = ACOConfig {
            max_iterations: 10,
            ..Default::default()
        };

        let mut aco = AntSystem::new(instance, config).unwrap();
        assert_eq!(aco.state(), SolverState::Ready);

        let solution = aco.run().unwrap();
        assert_eq!(aco.state(), SolverState::Done);
        assert_eq!(solution.iterations, 10);
        assert_eq!(solution.history.len(), 10);
        assert!(is_valid_tour(&solution.tour, 10));
        assert_eq!(solution.length, aco.distances().tour_length(&solution.tour));
    }

    #[test]
    fn test_tau0_is_inverse_nearest_neighbor_length() {
        let instance = create_test_instance();
        let aco = AntSystem::new(instance, ACOConfig::default()).unwrap();

        assert!((aco.tau0() * aco.nearest_neighbor_length() - 1.0).abs() < 1e-12);
        assert!((aco.pheromone().get(3, 5) - aco.tau0()).abs() < 1e-15);
    }

    #[test]
    fn test_trails_stay_symmetric_and_positive() {
        let instance = create_test_instance();
        let mut aco = AntSystem::new(instance, ACOConfig::default()).unwrap();

        for _ in 0..25 {
            aco.iterate();
            assert!(aco.pheromone().is_symmetric());
            assert!(aco.pheromone().is_strictly_positive());
        }
    }

    #[test]
    fn test_best_is_non_increasing() {
        let instance = create_test_instance();
        let config = ACOConfig { max_iterations: 30, seed: 3, ..Default::default() };
        let mut aco = AntSystem::new(instance, config).unwrap();
        let solution = aco.run().unwrap();

        for w in solution.history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(*solution.history.last().unwrap(), solution.length);
    }

    #[test]
    fn test_iterate_stops_after_configured_count() {
        let instance = create_test_instance();
        let config = ACOConfig { max_iterations: 2, ..Default::default() };
        let mut aco = AntSystem::new(instance, config).unwrap();

        aco.iterate();
        assert_eq!(aco.state(), SolverState::Iterating);
        aco.iterate();
        assert_eq!(aco.state(), SolverState::Done);
        assert!(!aco.iterate());
        assert_eq!(aco.iteration(), 2);
    }

    #[test]
    fn test_ants_rebuild_valid_tours() {
        let instance = create_test_instance();
        let mut aco = AntSystem::new(instance, ACOConfig { neighbor_list_len: Some(3), ..Default::default() }).unwrap();

        for _ in 0..5 {
            aco.iterate();
            for ant in aco.ants() {
                assert!(is_valid_tour(&ant.tour, 10));
                assert_eq!(ant.tour_length, aco.distances().tour_length(&ant.tour));
            }
        }
    }

    #[test]
    fn test_best_tour_ties_keep_incumbent() {
        let mut best = BestTour::new();
        let mut a = Ant::new(2);
        a.tour = vec![0, 1, 0];
        a.tour_length = 10.0;
        let mut b = Ant::new(2);
        b.tour = vec![1, 0, 1];
        b.tour_length = 10.0;

        assert!(best.observe(&[a, b.clone()]));
        assert_eq!(best.tour, vec![0, 1, 0]);
        assert!(!best.observe(&[b]));
        assert_eq!(best.tour, vec![0, 1, 0]);
    }

    #[test]
    fn test_invalid_config() {
        let instance = create_test_instance();
        for config in [
            ACOConfig { evaporation_rate: 1.0, ..Default::default() },
            ACOConfig { evaporation_rate: 0.0, ..Default::default() },
            ACOConfig { max_iterations: 0, ..Default::default() },
            ACOConfig { neighbor_list_len: Some(0), ..Default::default() },
        ] {
            assert!(matches!(
                AntSystem::new(instance.clone(), config),
                Err(SolverError::Config(_))
            ));
        }
    }

    #[test]
    fn test_empty_instance_is_done() {
        let mut aco = AntSystem::new(TspInstance::default(), ACOConfig::default()).unwrap();
        assert_eq!(aco.state(), SolverState::Done);
        assert!(aco.run().is_none());
    }
}
