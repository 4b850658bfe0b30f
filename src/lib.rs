//! ACO TSP Solver Library
//!
//! An Ant System solver for the Euclidean Traveling Salesman Problem.
//!
//! # Features
//!
//! - Coordinate file parsing with strict line format checks
//! - Precomputed (optionally truncated) distance table and ranked neighbour lists
//! - Nearest Neighbor baseline used to seed the pheromone trails
//! - Ant System with roulette-wheel selection over candidate lists
//! - Seeded, reproducible runs and multi-seed benchmarking
//!
//! # Example
//!
//! ```no_run
//! use aco_tsp_solver::instance::TspInstance;
//! use aco_tsp_solver::heuristics::aco::{AntSystem, ACOConfig};
//!
//! // Load instance
//! let instance = TspInstance::from_file("cities.txt").unwrap();
//!
//! // Run the colony
//! let config = ACOConfig { max_iterations: 50, ..Default::default() };
//! let mut aco = AntSystem::new(instance, config).unwrap();
//!
//! if let Some(solution) = aco.run() {
//!     println!("Best length: {}", solution.length);
//! }
//! ```

pub mod error;
pub mod instance;
pub mod matrix;
pub mod solution;
pub mod heuristics;
pub mod benchmark;

pub use error::{Result, SolverError};
pub use instance::TspInstance;
pub use solution::AcoSolution;
