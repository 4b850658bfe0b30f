//! Module for parsing and representing Euclidean TSP instances.
//!
//! An instance is an ordered list of cities with integer coordinates. Cities are
//! identified by their position in the input, starting at 0.
//! The coordinate file holds one `x y` pair per line; the first blank line (or the
//! end of the stream) terminates the list.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Result, SolverError};

/// A city of the instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Position of the city in the input (0-indexed)
    pub id: usize,
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
}

impl City {
    pub fn new(id: usize, x: i64, y: i64) -> Self {
        City { id, x, y }
    }

    /// Exact Euclidean distance to another city
    #[inline]
    pub fn distance_to(&self, other: &City) -> f64 {
        // subtract in f64 so distant i64 coordinates cannot overflow
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Represents a complete TSP instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TspInstance {
    /// Name of the instance (file stem when loaded from disk)
    pub name: String,
    /// Ordered list of cities
    pub cities: Vec<City>,
}

impl TspInstance {
    /// Build an instance from raw coordinates
    pub fn from_coordinates(name: &str, coords: &[(i64, i64)]) -> Self {
        let cities = coords.iter()
            .enumerate()
            .map(|(id, &(x, y))| City::new(id, x, y))
            .collect();

        TspInstance { name: name.to_string(), cities }
    }

    /// Parse an instance from a coordinate file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut instance = Self::from_reader(BufReader::new(file))?;
        instance.name = path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(instance)
    }

    /// Parse coordinates from any buffered reader.
    ///
    /// A line with no tokens ends the input. Any other line must hold exactly
    /// two integers, otherwise the whole instance is rejected. A line that is
    /// not valid UTF-8 is malformed too.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut coords = Vec::new();

        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let line = String::from_utf8(bytes?).map_err(|e| SolverError::Format {
                line: idx + 1,
                content: String::from_utf8_lossy(e.as_bytes()).trim_end().to_string(),
            })?;
            let parts: Vec<&str> = line.split_whitespace().collect();

            match parts.as_slice() {
                [] => break,
                [x, y] => {
                    let format_error = || SolverError::Format {
                        line: idx + 1,
                        content: line.clone(),
                    };
                    let x: i64 = x.parse().map_err(|_| format_error())?;
                    let y: i64 = y.parse().map_err(|_| format_error())?;
                    coords.push((x, y));
                }
                _ => {
                    return Err(SolverError::Format { line: idx + 1, content: line.clone() });
                }
            }
        }

        Ok(Self::from_coordinates("", &coords))
    }

    /// Number of cities
    #[inline]
    pub fn dimension(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Exact Euclidean distance between two cities
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.cities[i].distance_to(&self.cities[j])
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let n = self.dimension();

        let mut total = 0.0;
        let mut max_distance: f64 = 0.0;
        let mut pairs = 0usize;
        for i in 0..n {
            for j in i + 1..n {
                let d = self.distance(i, j);
                total += d;
                max_distance = max_distance.max(d);
                pairs += 1;
            }
        }
        let avg_distance = if pairs > 0 { total / pairs as f64 } else { 0.0 };

        let min_x = self.cities.iter().map(|c| c.x).min().unwrap_or(0);
        let max_x = self.cities.iter().map(|c| c.x).max().unwrap_or(0);
        let min_y = self.cities.iter().map(|c| c.y).min().unwrap_or(0);
        let max_y = self.cities.iter().map(|c| c.y).max().unwrap_or(0);

        InstanceStatistics {
            name: self.name.clone(),
            dimension: n,
            min_x,
            max_x,
            min_y,
            max_y,
            avg_distance,
            max_distance,
        }
    }
}

/// Statistics about a TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub dimension: usize,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
    pub avg_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Cities: {}", self.dimension)?;
        writeln!(f, "  Bounding box: x in [{}, {}], y in [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)
    }
}
