//! Benchmarking module for the ant system.
//!
//! Runs the solver repeatedly on one instance with consecutive seeds,
//! collects per-run results and aggregates them.

use crate::error::Result;
use crate::heuristics::aco::{ACOConfig, AntSystem};
use crate::instance::TspInstance;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

/// Result of a single seeded run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Instance name
    pub instance: String,
    /// Number of cities
    pub dimension: usize,
    /// Seed of the run
    pub seed: u64,
    /// Best tour length
    pub length: f64,
    /// Nearest-neighbour baseline length
    pub nearest_neighbor_length: f64,
    /// Improvement over the baseline in percent
    pub improvement: f64,
    /// Iteration at which the best tour was first found
    pub best_iteration: Option<usize>,
    /// Computation time in seconds
    pub time: f64,
}

/// Aggregated statistics over all runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    pub num_runs: usize,
    pub avg_length: f64,
    pub std_length: f64,
    pub best_length: f64,
    pub worst_length: f64,
    pub avg_improvement: f64,
    pub avg_time: f64,
    pub total_time: f64,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of seeded runs
    pub num_runs: usize,
    /// First seed; run `k` uses `base_seed + k`
    pub base_seed: u64,
    /// Colony parameters shared by every run (its seed is overridden)
    pub aco: ACOConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 5,
            base_seed: 0,
            aco: ACOConfig::default(),
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<RunResult>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
        }
    }

    /// Run every seed on the instance. An empty instance records nothing.
    pub fn run(&mut self, instance: &TspInstance) -> Result<()> {
        log::info!("Running benchmark on instance: {} ({} runs)", instance.name, self.config.num_runs);

        for k in 0..self.config.num_runs as u64 {
            let seed = self.config.base_seed + k;
            let aco_config = ACOConfig {
                seed,
                ..self.config.aco.clone()
            };

            let mut aco = AntSystem::new(instance.clone(), aco_config)?;
            let Some(solution) = aco.run() else {
                continue;
            };

            self.results.push(RunResult {
                instance: instance.name.clone(),
                dimension: instance.dimension(),
                seed,
                length: solution.length,
                nearest_neighbor_length: solution.nearest_neighbor_length,
                improvement: solution.improvement_over_baseline(),
                best_iteration: solution.iteration_of_best(),
                time: solution.computation_time,
            });
        }

        Ok(())
    }

    /// Compute statistics over recorded runs; `None` when nothing was recorded
    pub fn compute_statistics(&self) -> Option<RunStatistics> {
        if self.results.is_empty() {
            return None;
        }

        let lengths: Vec<f64> = self.results.iter().map(|r| r.length).collect();
        let improvements: Vec<f64> = self.results.iter().map(|r| r.improvement).collect();
        let times: Vec<f64> = self.results.iter().map(|r| r.time).collect();

        let std_length = if lengths.len() > 1 { lengths.iter().std_dev() } else { 0.0 };

        Some(RunStatistics {
            num_runs: self.results.len(),
            avg_length: lengths.iter().mean(),
            std_length,
            best_length: lengths.iter().cloned().fold(f64::INFINITY, f64::min),
            worst_length: lengths.iter().cloned().fold(0.0, f64::max),
            avg_improvement: improvements.iter().mean(),
            avg_time: times.iter().mean(),
            total_time: times.iter().sum::<f64>(),
        })
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("        Ant System Benchmark Report\n");
        report.push_str("========================================\n\n");

        report.push_str(&format!("{:>8} {:>12} {:>12} {:>10} {:>10}\n",
            "Seed", "Length", "NN Length", "Improv%", "Time"));
        report.push_str("-".repeat(56).as_str());
        report.push('\n');

        for result in &self.results {
            report.push_str(&format!("{:>8} {:>12.2} {:>12.2} {:>10.2} {:>10.4}\n",
                result.seed,
                result.length,
                result.nearest_neighbor_length,
                result.improvement,
                result.time));
        }

        report.push_str("-".repeat(56).as_str());
        report.push('\n');

        match self.compute_statistics() {
            Some(stats) => {
                report.push_str(&format!("Runs: {}\n", stats.num_runs));
                report.push_str(&format!("Best: {:.2}  Worst: {:.2}\n", stats.best_length, stats.worst_length));
                report.push_str(&format!("Average: {:.2} (std {:.2})\n", stats.avg_length, stats.std_length));
                report.push_str(&format!("Average improvement: {:.2}%\n", stats.avg_improvement));
                report.push_str(&format!("Total time: {:.4}s\n", stats.total_time));
            }
            None => report.push_str("No runs recorded\n"),
        }

        report
    }

    /// Get all results
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }
}
