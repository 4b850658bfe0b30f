//! Heuristics module for the Euclidean TSP.
//!
//! This module exports the nearest-neighbour baseline and the ant system.

pub mod construction;
pub mod pheromone;
pub mod ant;
pub mod aco;

pub use construction::*;
pub use pheromone::*;
pub use ant::*;
pub use aco::*;
