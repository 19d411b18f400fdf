//! Fixed-size toroidal cell grid.
//!
//! Cells are stored as a flat row-major array: `cells[row * cols + col]`.
//! Edges wrap, so the neighbor above row 0 is the last row and the neighbor
//! left of column 0 is the last column.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use super::EngineError;

/// Two-dimensional grid of live (`true`) and dead (`false`) cells.
///
/// Dimensions are fixed at construction and always non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; len],
        })
    }

    /// Create a grid where each cell is alive when a uniform draw in `[0, 100)`
    /// falls below `threshold`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        threshold: u32,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let mut grid = Self::new(rows, cols)?;
        for cell in &mut grid.cells {
            *cell = rng.gen_range(0..100u32) < threshold;
        }
        Ok(grid)
    }

    /// Copy an explicit set of rows. Dimensions are derived from the input.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, EngineError> {
        let first = rows.first().ok_or(EngineError::NullSeed)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(EngineError::NullSeed);
        }
        let mut grid = Self::new(rows.len(), cols)?;

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(EngineError::DimensionMismatch {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            grid.cells[row * cols..(row + 1) * cols].copy_from_slice(values);
        }

        Ok(grid)
    }

    /// Parse a plaintext pattern: `.` is dead, `#`, `O` or `o` is alive.
    ///
    /// Blank lines and lines starting with `!` are skipped.
    pub fn from_plaintext(text: &str) -> Result<Self, EngineError> {
        let mut rows = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            let row = line
                .chars()
                .map(|ch| match ch {
                    '.' => Ok(false),
                    '#' | 'O' | 'o' => Ok(true),
                    _ => Err(EngineError::InvalidPattern {
                        line: line_no + 1,
                        ch,
                    }),
                })
                .collect::<Result<Vec<bool>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// An all-dead grid with the same dimensions as this one.
    pub fn dead_like(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![false; self.cells.len()],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (rows * cols).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if row >= self.rows || col >= self.cols {
            return Err(EngineError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Read a cell, failing with `OutOfRange` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.check(row, col).map(|idx| self.cells[idx])
    }

    /// Write a cell, failing with `OutOfRange` outside the grid.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), EngineError> {
        let idx = self.check(row, col)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Unchecked read for in-range coordinates.
    #[inline]
    pub(crate) fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Row-major view of every cell.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.cols)
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.iter_rows().map(<[bool]>::to_vec).collect()
    }

    /// Set every cell dead.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Count live cells among the 8 surrounding positions, wrapping at the edges.
    ///
    /// Only the `(0, 0)` offset is skipped. On grids narrower than 3 cells a
    /// wrapped position can land back on `(row, col)` and is then counted.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0u8;
        for dr in [-1isize, 0, 1] {
            let r = wrap(row, dr, self.rows);
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let c = wrap(col, dc, self.cols);
                if self.cells[r * self.cols + c] {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Number of cells in a `rows` x `cols` grid.
///
/// Fails with `InvalidDimensions` for zero sizes and for sizes whose cell
/// count cannot be allocated.
pub fn cell_count(rows: usize, cols: usize) -> Result<usize, EngineError> {
    rows.checked_mul(cols)
        .filter(|&len| len > 0 && len <= isize::MAX as usize)
        .ok_or(EngineError::InvalidDimensions { rows, cols })
}

#[inline]
fn wrap(index: usize, offset: isize, len: usize) -> usize {
    (index as isize + offset).rem_euclid(len as isize) as usize
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
