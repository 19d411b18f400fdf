//! Population statistics for monitoring.

use serde::{Deserialize, Serialize};

use super::Grid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridStats {
    pub generation: u64,
    pub population: usize,
    pub cells: usize,
    pub live_fraction: f64,
}

impl GridStats {
    /// Compute statistics for a grid at the given generation.
    pub fn from_grid(generation: u64, grid: &Grid) -> Self {
        let population = grid.population();
        let cells = grid.len();
        Self {
            generation,
            population,
            cells,
            live_fraction: population as f64 / cells as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_fraction() {
        let grid = Grid::from_plaintext("#...\n....\n..##\n....\n").unwrap();
        let stats = GridStats::from_grid(3, &grid);
        assert_eq!(stats.generation, 3);
        assert_eq!(stats.population, 3);
        assert_eq!(stats.cells, 16);
        assert!((stats.live_fraction - 3.0 / 16.0).abs() < 1e-12);
    }
}
