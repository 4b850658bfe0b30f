//! ACO TSP Solver - Command Line Interface
//!
//! Solves Euclidean TSP instances given as `x y` coordinate files with an Ant System.

use clap::{Args, Parser, Subcommand};
use aco_tsp_solver::benchmark::{Benchmark, BenchmarkConfig};
use aco_tsp_solver::error::{Result, SolverError};
use aco_tsp_solver::heuristics::aco::{ACOConfig, AntSystem};
use aco_tsp_solver::instance::TspInstance;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aco-tsp-solver")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "An Ant System solver for the Euclidean TSP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance and print best length, best tour and nearest-neighbour length
    Solve {
        /// Number of iterations
        iterations: usize,

        /// Coordinate file (one `x y` integer pair per line)
        input: PathBuf,

        #[command(flatten)]
        colony: ColonyArgs,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output solution to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the solver with several seeds on one instance
    Benchmark {
        /// Number of iterations per run
        iterations: usize,

        /// Coordinate file
        input: PathBuf,

        #[command(flatten)]
        colony: ColonyArgs,

        /// Number of runs
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// Seed of the first run
        #[arg(long, default_value = "0")]
        base_seed: u64,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze an instance
    Analyze {
        /// Coordinate file
        input: PathBuf,
    },
}

/// Colony parameters shared by `solve` and `benchmark`
#[derive(Args, Debug)]
struct ColonyArgs {
    /// Pheromone influence exponent
    #[arg(long, default_value = "1.0")]
    alpha: f64,

    /// Distance influence exponent
    #[arg(long, default_value = "5.0")]
    beta: f64,

    /// Evaporation rate, strictly between 0 and 1
    #[arg(long, default_value = "0.5")]
    rho: f64,

    /// Candidate list size for roulette selection (all cities when omitted)
    #[arg(long)]
    neighbors: Option<usize>,

    /// Keep exact Euclidean distances instead of truncating them
    #[arg(long)]
    exact_distances: bool,
}

impl ColonyArgs {
    fn to_config(&self, iterations: usize, seed: u64) -> Result<ACOConfig> {
        if iterations == 0 {
            return Err(SolverError::Usage("number of iterations must be a positive integer".to_string()));
        }

        Ok(ACOConfig {
            alpha: self.alpha,
            beta: self.beta,
            evaporation_rate: self.rho,
            max_iterations: iterations,
            seed,
            neighbor_list_len: self.neighbors,
            truncate_distances: !self.exact_distances,
        })
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve { iterations, input, colony, seed, output, verbose } => {
            solve_instance(&input, iterations, &colony, seed, output, verbose)
        }

        Commands::Benchmark { iterations, input, colony, runs, base_seed, output } => {
            run_benchmark(&input, iterations, &colony, runs, base_seed, output)
        }

        Commands::Analyze { input } => analyze_instance(&input),
    };

    if let Err(e) = outcome {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve_instance(
    path: &PathBuf,
    iterations: usize,
    colony: &ColonyArgs,
    seed: u64,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let config = colony.to_config(iterations, seed)?;
    let instance = TspInstance::from_file(path)?;

    if verbose {
        println!("{}", instance.statistics());
        println!("Config: {:?}", config);
    }

    let mut aco = AntSystem::new(instance, config)?;

    // empty input: nothing to report
    let Some(solution) = aco.run() else {
        return Ok(());
    };

    println!("{}", solution.length);
    println!("{:?}", solution.tour);
    println!("{}", solution.nearest_neighbor_length);

    if verbose {
        println!("\n{}", solution);
        if let Some(iter) = solution.iteration_of_best() {
            println!("Best found at iteration: {}", iter);
        }
    }

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&solution)?;
        std::fs::write(&out_path, json)?;
        println!("\nSolution saved to {:?}", out_path);
    }

    Ok(())
}

fn run_benchmark(
    path: &PathBuf,
    iterations: usize,
    colony: &ColonyArgs,
    runs: usize,
    base_seed: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    if runs == 0 {
        return Err(SolverError::Usage("number of runs must be a positive integer".to_string()));
    }

    let aco = colony.to_config(iterations, base_seed)?;
    let instance = TspInstance::from_file(path)?;

    println!("Benchmarking {} (n={}) over {} runs...", instance.name, instance.dimension(), runs);

    let mut benchmark = Benchmark::new(BenchmarkConfig {
        num_runs: runs,
        base_seed,
        aco,
    });
    benchmark.run(&instance)?;

    println!("\n{}", benchmark.generate_report());

    if let Some(out_path) = output {
        benchmark.export_to_csv(&out_path)?;
        println!("Results exported to {:?}", out_path);
    }

    Ok(())
}

fn analyze_instance(path: &PathBuf) -> Result<()> {
    let instance = TspInstance::from_file(path)?;

    println!("========== Instance Analysis ==========\n");
    println!("{}", instance.statistics());

    let aco = AntSystem::new(instance, ACOConfig::default())?;
    println!("Nearest Neighbor tour length: {:.2}", aco.nearest_neighbor_length());
    println!("Initial pheromone (tau0): {:.6e}", aco.tau0());

    Ok(())
}
