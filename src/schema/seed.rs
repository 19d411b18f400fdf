//! Seed types for initializing the engine grid.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{DEFAULT_PROBABILITY_OF_LIFE, effective_probability};
use crate::compute::{EngineError, Grid};

/// Complete seed specification for engine initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self::random(100, 100, DEFAULT_PROBABILITY_OF_LIFE, None)
    }
}

/// Ways to build the initial grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Each cell alive with `probability_of_life` percent chance.
    Random {
        width: usize,
        height: usize,
        /// Percent in 0..=99. 100 or above falls back to 25.
        probability_of_life: u32,
        /// Fixed RNG seed for reproducible grids.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Explicit rows of cells, copied verbatim.
    Rows { rows: Vec<Vec<bool>> },
    /// Plaintext rows using `.` for dead and `#`/`O` for alive.
    Plaintext { lines: Vec<String> },
    /// Sparse list of live `(row, col)` coordinates on an otherwise dead grid.
    Cells {
        width: usize,
        height: usize,
        alive: Vec<(usize, usize)>,
    },
}

impl Seed {
    pub fn random(
        width: usize,
        height: usize,
        probability_of_life: u32,
        seed: Option<u64>,
    ) -> Self {
        Self {
            pattern: Pattern::Random {
                width,
                height,
                probability_of_life,
                seed,
            },
        }
    }

    pub fn rows(rows: Vec<Vec<bool>>) -> Self {
        Self {
            pattern: Pattern::Rows { rows },
        }
    }

    pub fn plaintext(text: &str) -> Self {
        Self {
            pattern: Pattern::Plaintext {
                lines: text.lines().map(str::to_owned).collect(),
            },
        }
    }

    pub fn cells(width: usize, height: usize, alive: Vec<(usize, usize)>) -> Self {
        Self {
            pattern: Pattern::Cells {
                width,
                height,
                alive,
            },
        }
    }

    /// Sparse seed with one shape placed with its top-left corner at `(row, col)`.
    pub fn shape(width: usize, height: usize, shape: Shape, row: usize, col: usize) -> Self {
        Self::cells(width, height, shape.cells_at(row, col))
    }

    /// Generate the initial grid.
    pub fn generate(&self) -> Result<Grid, EngineError> {
        match &self.pattern {
            Pattern::Random {
                width,
                height,
                probability_of_life,
                seed,
            } => {
                let threshold = effective_probability(*probability_of_life);
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_entropy(),
                };
                Grid::random(*height, *width, threshold, &mut rng)
            }
            Pattern::Rows { rows } => Grid::from_rows(rows),
            Pattern::Plaintext { lines } => Grid::from_plaintext(&lines.join("\n")),
            Pattern::Cells {
                width,
                height,
                alive,
            } => {
                let mut grid = Grid::new(*height, *width)?;
                for &(row, col) in alive {
                    grid.set(row, col, true)?;
                }
                Ok(grid)
            }
        }
    }
}

/// Well-known small patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// 2x2 still life.
    Block,
    /// Horizontal 1x3 line, period-2 oscillator.
    Blinker,
    /// Moves one cell down and right every 4 generations.
    Glider,
}

impl Shape {
    /// Live cell offsets relative to the top-left of the bounding box.
    pub fn offsets(self) -> &'static [(usize, usize)] {
        match self {
            Shape::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Shape::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Shape::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
        }
    }

    /// Absolute coordinates of the shape placed at `(row, col)`.
    ///
    /// Coordinates saturate at `usize::MAX`, which no grid contains, so a
    /// placement past the edge surfaces as `OutOfRange` when generated.
    pub fn cells_at(self, row: usize, col: usize) -> Vec<(usize, usize)> {
        self.offsets()
            .iter()
            .map(|&(r, c)| (row.saturating_add(r), col.saturating_add(c)))
            .collect()
    }
}
