//! Ants and the probabilistic tour construction they perform.

use crate::heuristics::pheromone::ChoiceInfo;
use crate::matrix::{DistanceTable, NeighborIndex};
use rand::prelude::*;

/// One ant of the colony.
///
/// The same value is reused every iteration; `reset` clears its transient state.
#[derive(Debug, Clone)]
pub struct Ant {
    /// Closed tour of `n + 1` cities
    pub tour: Vec<usize>,
    /// Cities already placed in the tour
    pub visited: Vec<bool>,
    /// Sum of edge distances along `tour`, set by `close_tour`
    pub tour_length: f64,
}

impl Ant {
    pub fn new(n: usize) -> Self {
        Ant {
            tour: vec![0; n + 1],
            visited: vec![false; n],
            tour_length: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.visited.iter_mut().for_each(|v| *v = false);
        self.tour_length = 0.0;
    }

    #[inline]
    fn place(&mut self, step: usize, city: usize) {
        self.tour[step] = city;
        self.visited[city] = true;
    }

    /// Copy the start city to the last slot and measure the tour
    pub fn close_tour(&mut self, dist: &DistanceTable) {
        let n = self.visited.len();
        self.tour[n] = self.tour[0];
        self.tour_length = dist.tour_length(&self.tour);
    }
}

/// Drives one construction phase for the whole colony.
///
/// Reads the distance, neighbour and choice tables without modifying them.
/// Random draws come from the caller's generator in a fixed order: every ant's
/// start city (in ant order), then for each step one draw per ant (in ant
/// order) whenever the roulette wheel is spun.
pub struct ConstructionEngine<'a> {
    dist: &'a DistanceTable,
    neighbors: &'a NeighborIndex,
    choice: &'a ChoiceInfo,
    candidate_len: usize,
}

impl<'a> ConstructionEngine<'a> {
    /// `candidate_len` caps the roulette candidate list; `None` keeps every neighbour
    pub fn new(
        dist: &'a DistanceTable,
        neighbors: &'a NeighborIndex,
        choice: &'a ChoiceInfo,
        candidate_len: Option<usize>,
    ) -> Self {
        ConstructionEngine {
            dist,
            neighbors,
            choice,
            candidate_len: candidate_len.unwrap_or(usize::MAX),
        }
    }

    /// Let every ant build a complete closed tour
    pub fn construct<R: Rng>(&self, ants: &mut [Ant], rng: &mut R) {
        let n = self.dist.len();
        if n == 0 {
            return;
        }

        for ant in ants.iter_mut() {
            ant.reset();
            let start = rng.gen_range(0..n);
            ant.place(0, start);
        }

        let mut weights = Vec::with_capacity(n);
        for step in 1..n {
            for ant in ants.iter_mut() {
                self.neighbor_list_rule(ant, step, rng, &mut weights);
            }
        }

        for ant in ants.iter_mut() {
            ant.close_tour(self.dist);
        }
    }

    /// Roulette-wheel choice among the current city's candidate neighbours
    fn neighbor_list_rule<R: Rng>(&self, ant: &mut Ant, step: usize, rng: &mut R, weights: &mut Vec<f64>) {
        let city = ant.tour[step - 1];
        let candidates = self.neighbors.nearest(city, self.candidate_len);

        weights.clear();
        weights.extend(candidates.iter().map(|&c| {
            if ant.visited[c] { 0.0 } else { self.choice.get(city, c) }
        }));
        let total: f64 = weights.iter().sum();

        if total <= 0.0 || !total.is_finite() {
            self.choose_best_next(ant, step);
            return;
        }

        let r = rng.gen_range(0.0..total);
        match roulette_pick(candidates, weights, r) {
            Some(next) => ant.place(step, next),
            None => self.choose_best_next(ant, step),
        }
    }

    /// Full scan over all cities for the unvisited one with the largest choice value.
    /// Ties go to the lowest index.
    fn choose_best_next(&self, ant: &mut Ant, step: usize) {
        let city = ant.tour[step - 1];
        let mut best: Option<(usize, f64)> = None;

        for (c, &seen) in ant.visited.iter().enumerate() {
            if seen {
                continue;
            }
            let v = self.choice.get(city, c);
            if best.map_or(true, |(_, bv)| v > bv) {
                best = Some((c, v));
            }
        }

        if let Some((next, _)) = best {
            log::trace!("fallback scan from city {} picked {}", city, next);
            ant.place(step, next);
        }
    }
}

/// Walk the cumulative weights and return the first candidate whose running
/// sum reaches `r`. Entries with a non-positive weight are never returned. If
/// rounding leaves the walk short of `r`, the last positive candidate wins.
fn roulette_pick(candidates: &[usize], weights: &[f64], r: f64) -> Option<usize> {
    let mut acc = 0.0;
    let mut chosen = None;
    for (&c, &w) in candidates.iter().zip(weights) {
        if w <= 0.0 {
            continue;
        }
        acc += w;
        chosen = Some(c);
        if acc >= r {
            break;
        }
    }
    chosen
}
