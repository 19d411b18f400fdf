//! Transition rule for Conway's Game of Life (B3/S23).
//!
//! A live cell with two or three live neighbors survives, a dead cell with
//! exactly three becomes alive, and every other cell is dead next generation.

/// Next state of a single cell given its current state and live neighbor count.
#[inline]
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}
