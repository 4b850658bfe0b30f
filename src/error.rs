//! Error types for the ACO TSP solver.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SolverError>;

/// Everything that can stop a run before the colony starts iterating.
///
/// The optimization loop itself has no failure path: degenerate numeric
/// cases (coincident cities, zero-length tours) are resolved by policy.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Missing or non-numeric invocation argument
    #[error("wrong usage: {0}\nUsage: <NUMBER OF ITERATIONS> <INPUT FILE NAME>")]
    Usage(String),

    /// Malformed coordinate line
    #[error("wrong input file format at line {line}: {content:?}\nExpected input file format:\n<INTEGER><WHITE CHARACTERS><INTEGER>")]
    Format { line: usize, content: String },

    /// Input file could not be opened or read
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid colony parameters
    #[error("invalid configuration: {0}")]
    Config(String),

    /// CSV export failure
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export failure
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
}
